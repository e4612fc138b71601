//! Provides [`Tour`], an ordered list of [`Waypoint`]s the camera can walk through on its own.

use std::time::Duration;

use bevy_reflect::prelude::*;

use super::state::CameraState;

/// A named camera state visited by a [`Tour`].
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Waypoint {
    /// Label shown to users, e.g. "Front door".
    pub name: String,
    /// Where the camera should be when it arrives.
    pub state: CameraState,
    /// How long the leg leading to this waypoint takes. `None` uses the interactor's configured
    /// animation time, or a duration derived from the distance travelled.
    pub duration: Option<Duration>,
}

impl Waypoint {
    /// A waypoint reached in an automatically computed time.
    pub fn new(name: impl Into<String>, state: CameraState) -> Self {
        Self {
            name: name.into(),
            state,
            duration: None,
        }
    }

    /// Set the duration of the leg leading to this waypoint.
    #[must_use = "with_duration returns a modified Waypoint"]
    pub fn with_duration(self, duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..self
        }
    }
}

/// Tracks progress through a list of waypoints.
///
/// The tour only knows which waypoint comes next; the interactor owning it starts each leg and
/// reports arrivals through [`Tour::arrive`].
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct Tour {
    waypoints: Vec<Waypoint>,
    circular: bool,
    index: usize,
    walking: bool,
}

impl Tour {
    /// A tour through `waypoints`. A circular tour starts over after the last waypoint.
    pub fn new(waypoints: Vec<Waypoint>, circular: bool) -> Self {
        Self {
            waypoints,
            circular,
            index: 0,
            walking: false,
        }
    }

    /// The waypoints, in visiting order.
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Index of the waypoint the next (or current) leg leads to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Is the tour walking from waypoint to waypoint on its own?
    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Start or continue walking. Returns the waypoint the next leg leads to, or `None` if there
    /// are no waypoints.
    pub fn resume(&mut self) -> Option<&Waypoint> {
        if self.index >= self.waypoints.len() {
            self.index = 0;
        }
        if self.waypoints.is_empty() {
            return None;
        }
        self.walking = true;
        self.waypoints.get(self.index)
    }

    /// Stop walking, keeping the position in the tour.
    pub fn pause(&mut self) {
        self.walking = false;
    }

    /// Stop walking and go back to the first waypoint.
    pub fn rewind(&mut self) {
        self.walking = false;
        self.index = 0;
    }

    /// The current leg has arrived. Returns the next waypoint to walk to, or `None` if the tour
    /// is not walking or has just finished. A finished open tour rewinds, so the next
    /// [`Tour::resume`] starts from the first waypoint.
    pub fn arrive(&mut self) -> Option<&Waypoint> {
        if !self.walking {
            return None;
        }
        self.index += 1;
        if self.index >= self.waypoints.len() {
            if self.circular && !self.waypoints.is_empty() {
                self.index = 0;
            } else {
                self.rewind();
                return None;
            }
        }
        self.waypoints.get(self.index)
    }
}

//! Provides [`InteractorOptions`], the setup configuration of an interactor, and [`SceneBounds`].

use std::time::Duration;

use bevy_ecs::prelude::*;
use bevy_math::{DMat4, DVec3};
use bevy_reflect::prelude::*;

use super::tour::Waypoint;

/// The bounding sphere of the scene being viewed, supplied by the host every frame.
///
/// Interactors work in a normalized scene space where the scene is centered on the origin with
/// radius one. The produced view matrix maps world space into that space first, using the bounds
/// current at the time the matrix is computed.
#[derive(Debug, Clone, Copy, PartialEq, Resource, Reflect)]
#[reflect(Resource)]
pub struct SceneBounds {
    /// World space center of the scene.
    pub center: DVec3,
    /// One over the world space radius of the scene.
    pub inverse_radius: f64,
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self {
            center: DVec3::ZERO,
            inverse_radius: 1.0,
        }
    }
}

impl SceneBounds {
    /// Bounds of a sphere with the given center and radius.
    pub fn from_sphere(center: DVec3, radius: f64) -> Self {
        Self {
            center,
            inverse_radius: radius.recip(),
        }
    }

    /// The inverse radius, or `1.0` if it is not a positive finite number.
    pub fn scale(&self) -> f64 {
        if self.inverse_radius > 0.0 && self.inverse_radius.is_finite() {
            self.inverse_radius
        } else {
            1.0
        }
    }

    /// The center, or the origin if it is not finite.
    pub fn origin(&self) -> DVec3 {
        if self.center.is_finite() {
            self.center
        } else {
            DVec3::ZERO
        }
    }

    /// Map a world space point into normalized scene space.
    pub fn normalize_point(&self, point: DVec3) -> DVec3 {
        (point - self.origin()) * self.scale()
    }

    /// Map a normalized scene space point back into world space.
    pub fn denormalize_point(&self, point: DVec3) -> DVec3 {
        point / self.scale() + self.origin()
    }

    /// The matrix taking world space into normalized scene space.
    pub fn normalization(&self) -> DMat4 {
        DMat4::from_scale(DVec3::splat(self.scale())) * DMat4::from_translation(-self.origin())
    }
}

/// Nominal speeds used to work out how long an animated transition should take. Each field's
/// travel divided by its speed gives the time it would need alone; the slowest field sets the
/// duration for all of them.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AnimationSpeeds {
    /// Degrees per second, for turn, tilt and trackball rotation.
    pub angular: f64,
    /// Normalized scene units per second, for zoom distance.
    pub distance: f64,
    /// Normalized scene units per second, for each pan axis.
    pub pan: f64,
    /// Path offset per second.
    pub path: f64,
}

impl Default for AnimationSpeeds {
    fn default() -> Self {
        Self {
            angular: 90.0,
            distance: 1.0,
            pan: 0.5,
            path: 0.2,
        }
    }
}

/// Setup configuration of an [`Interactor`](super::component::Interactor).
///
/// Build one with struct update syntax to override only what you need:
///
/// ```
/// # use bevy_interactor_cam::prelude::*;
/// let options = InteractorOptions {
///     start_theta: 20.0,
///     min_max_theta: [-80.0, 80.0],
///     ..Default::default()
/// };
/// ```
///
/// Angles are in degrees, distances and pans in normalized scene units (see [`SceneBounds`]).
/// Options a kind of interactor has no use for are ignored.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct InteractorOptions {
    /// Initial turn about the vertical axis.
    pub start_phi: f64,
    /// Initial tilt about the horizontal axis.
    pub start_theta: f64,
    /// Initial distance from the orbit center.
    pub start_distance: f64,
    /// Initial pan.
    pub start_pan: DVec3,
    /// Initial position along the rail path.
    pub start_path_offset: f64,
    /// Turn bound. `[-180, 180]` disables turn clamping and enables shortest-way spins.
    pub min_max_phi: [f64; 2],
    /// Tilt bound.
    pub min_max_theta: [f64; 2],
    /// Distance bound.
    pub min_max_dist: [f64; 2],
    /// Pan bound along X.
    pub min_max_pan_x: [f64; 2],
    /// Pan bound along Y.
    pub min_max_pan_y: [f64; 2],
    /// Pan bound along Z.
    pub min_max_pan_z: [f64; 2],
    /// Control points of the rail path, in path space.
    pub path_points: Vec<DVec3>,
    /// Waypoints of the camera tour.
    pub path_states: Vec<Waypoint>,
    /// Does the rail path close on itself, and does the tour start over after its last waypoint?
    pub path_circular: bool,
    /// Prevents scale input from moving the camera along the rail path.
    pub path_locked: bool,
    /// Prevents pointer input from interrupting a running animation.
    pub animation_locked: bool,
    /// Fixed duration of every animated transition. `None` derives it from the distance
    /// travelled.
    pub animation_time: Option<Duration>,
    /// Shortest derived transition.
    pub min_duration: Duration,
    /// Longest derived transition.
    pub max_duration: Duration,
    /// Nominal speeds used to derive transition durations.
    pub speeds: AnimationSpeeds,
    /// Path offset moved by one discrete rail step.
    pub step_length: f64,
    /// Transform from rail path space into world space, applied before normalization.
    pub path_transform: Option<DMat4>,
}

impl Default for InteractorOptions {
    fn default() -> Self {
        Self {
            start_phi: 0.0,
            start_theta: 0.0,
            start_distance: 2.0,
            start_pan: DVec3::ZERO,
            start_path_offset: 0.0,
            min_max_phi: [-180.0, 180.0],
            min_max_theta: [-70.0, 70.0],
            min_max_dist: [0.2, 4.0],
            min_max_pan_x: [-1.0, 1.0],
            min_max_pan_y: [-1.0, 1.0],
            min_max_pan_z: [-1.0, 1.0],
            path_points: Vec::new(),
            path_states: Vec::new(),
            path_circular: false,
            path_locked: false,
            animation_locked: false,
            animation_time: None,
            min_duration: Duration::from_millis(500),
            max_duration: Duration::from_secs(3),
            speeds: AnimationSpeeds::default(),
            step_length: 0.02,
            path_transform: None,
        }
    }
}

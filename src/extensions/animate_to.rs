//! A `bevy_interactor_cam` extension that starts animated transitions from events, so any system
//! can send a camera somewhere without access to its [`Interactor`].

use std::time::Duration;

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_log::prelude::*;
use bevy_window::RequestRedraw;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct AnimateToPlugin;

impl Plugin for AnimateToPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AnimateToTrigger>()
            // In PostUpdate so events sent in Update are seen the same frame. The interactor
            // starts moving on the next PreUpdate.
            .add_systems(PostUpdate, AnimateToTrigger::receive);
    }
}

/// Send this event to animate a camera to a state, or to continue its tour.
#[derive(Debug, Clone, Event)]
pub struct AnimateToTrigger {
    /// The camera to animate.
    pub camera: Entity,
    /// Where to go. `None` resumes the camera's tour instead.
    pub target: Option<CameraState>,
    /// How long the transition takes. `None` lets the interactor decide.
    pub duration: Option<Duration>,
}

impl AnimateToTrigger {
    /// Animate `camera` to `target`.
    pub fn state(camera: Entity, target: CameraState) -> Self {
        Self {
            camera,
            target: Some(target),
            duration: None,
        }
    }

    /// Continue the tour of `camera` from its next waypoint.
    pub fn resume_tour(camera: Entity) -> Self {
        Self {
            camera,
            target: None,
            duration: None,
        }
    }

    /// Use a fixed transition duration.
    #[must_use = "with_duration returns a modified AnimateToTrigger"]
    pub fn with_duration(self, duration: Duration) -> Self {
        Self {
            duration: Some(duration),
            ..self
        }
    }

    fn receive(
        mut events: EventReader<Self>,
        mut cameras: Query<&mut Interactor>,
        mut redraw: EventWriter<RequestRedraw>,
    ) {
        for event in events.read() {
            let Ok(mut interactor) = cameras.get_mut(event.camera) else {
                continue;
            };
            match event.target {
                Some(target) => interactor.animate_to_state(target, event.duration),
                None => {
                    if !interactor.resume_tour() {
                        warn_once!("Camera {:?} has no tour to resume", event.camera);
                        continue;
                    }
                }
            }
            redraw.send(RequestRedraw);
        }
    }
}

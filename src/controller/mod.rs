//! Camera interactor implementation.
//!
//! The leaf modules are usable on their own; [`component::Interactor`] composes them into the
//! four navigation metaphors, and [`MinimalInteractorPlugin`] drives interactors every frame.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;

pub mod channel;
pub mod component;
pub mod limits;
pub mod options;
pub mod rail;
pub mod rotation;
pub mod state;
pub mod tour;

/// System set containing [`component::Interactor::update_camera_transforms`]. Send pointer
/// samples before it to have them show up in the same frame.
#[derive(Debug, Clone, PartialEq, Eq, Hash, SystemSet)]
pub struct InteractorUpdateSet;

/// Adds the core interactor systems, without any input handling or extensions.
pub struct MinimalInteractorPlugin;

impl Plugin for MinimalInteractorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<options::SceneBounds>()
            .add_event::<component::InteractorArrived>()
            .add_event::<bevy_window::RequestRedraw>()
            .add_systems(
                PreUpdate,
                component::Interactor::update_camera_transforms.in_set(InteractorUpdateSet),
            )
            .register_type::<component::Interactor>()
            .register_type::<options::SceneBounds>()
            .register_type::<options::InteractorOptions>()
            .register_type::<state::CameraState>()
            .register_type::<state::Action>()
            .register_type::<state::InteractorKind>();
    }
}

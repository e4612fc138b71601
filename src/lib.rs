//! Camera interactors for Bevy: turntable, turntable with pan, free trackball, and rail cameras.
//!
//! Each camera entity carries an [`Interactor`](controller::component::Interactor), which turns
//! pointer drags into a view matrix and animates smoothly between camera states. Interactors keep
//! every field within its configured bounds, go the short way round when spinning, and can walk
//! through a tour of waypoints on their own.
//!
//! ## Usage
//!
//! 1. Add the [`DefaultInteractorPlugins`] plugin group.
//! 2. Add an [`Interactor`](controller::component::Interactor) next to a camera's `Transform`.
//! 3. Optionally insert a [`SceneBounds`](controller::options::SceneBounds) resource describing
//!    the scene, so distances and pans are relative to its size.
//!
//! Transitions can be started directly on the component, or by sending an
//! [`AnimateToTrigger`](extensions::animate_to::AnimateToTrigger).

#![warn(missing_docs)]

pub mod controller;
pub mod extensions;
pub mod input;

/// Common imports.
pub mod prelude {
    pub use crate::{
        controller::{
            component::*, limits::Limits, options::*, rail::RailPath, state::*, tour::*,
            InteractorUpdateSet, MinimalInteractorPlugin,
        },
        extensions::animate_to::{AnimateToPlugin, AnimateToTrigger},
        input::{DefaultInputPlugin, MouseInputSettings},
        DefaultInteractorPlugins,
    };
}

use bevy_app::{prelude::*, PluginGroupBuilder};

/// Adds [`bevy_interactor_cam`](crate) functionality with all extensions and the default input
/// plugin.
pub struct DefaultInteractorPlugins;

impl PluginGroup for DefaultInteractorPlugins {
    #[allow(clippy::let_and_return)]
    fn build(self) -> PluginGroupBuilder {
        let group = PluginGroupBuilder::start::<Self>()
            .add(input::DefaultInputPlugin)
            .add(controller::MinimalInteractorPlugin)
            .add(extensions::animate_to::AnimateToPlugin);

        #[cfg(feature = "extension_path_indicator")]
        let group = group.add(extensions::path_indicator::PathIndicatorPlugin);

        group
    }
}

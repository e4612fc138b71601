//! Default mouse input for [`Interactor`]s.
//!
//! Left drag rotates, right drag pans, and the wheel zooms (or steps along the path of a rail
//! camera). Pointer positions are sent to the interactors in normalized device coordinates of the
//! primary window.

use bevy_app::prelude::*;
use bevy_ecs::prelude::*;
use bevy_input::{
    mouse::{MouseScrollUnit, MouseWheel},
    prelude::*,
    InputSystem,
};
use bevy_math::{prelude::*, DMat4, DVec2};
use bevy_reflect::prelude::*;
use bevy_window::{PrimaryWindow, Window};

use crate::controller::{component::Interactor, state::Action, InteractorUpdateSet};

/// See the [module](self) docs.
pub struct DefaultInputPlugin;

impl Plugin for DefaultInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MouseInputSettings>()
            .add_systems(
                PreUpdate,
                default_camera_inputs
                    .after(InputSystem)
                    .before(InteractorUpdateSet),
            )
            .register_type::<MouseInputSettings>();
    }
}

/// Tunes how mouse input is mapped onto interactors.
#[derive(Debug, Clone, Resource, Reflect)]
#[reflect(Resource)]
pub struct MouseInputSettings {
    /// Button that rotates while held.
    pub rotate_button: MouseButton,
    /// Button that pans while held.
    pub pan_button: MouseButton,
    /// Scale factor of one wheel notch toward the scene.
    pub zoom_in_factor: f64,
    /// Scale factor of one wheel notch away from the scene.
    pub zoom_out_factor: f64,
    /// Pixels of touchpad scrolling that count as one wheel notch.
    pub pixels_per_notch: f64,
}

impl Default for MouseInputSettings {
    fn default() -> Self {
        Self {
            rotate_button: MouseButton::Left,
            pan_button: MouseButton::Right,
            zoom_in_factor: 0.9,
            zoom_out_factor: 1.1,
            pixels_per_notch: 100.0,
        }
    }
}

impl MouseInputSettings {
    /// The drag action implied by the buttons currently held.
    pub fn action(&self, buttons: &ButtonInput<MouseButton>) -> Action {
        if buttons.pressed(self.rotate_button) {
            Action::Rotate
        } else if buttons.pressed(self.pan_button) {
            Action::Pan
        } else {
            Action::None
        }
    }

    /// The scale factor of `notches` wheel notches, positive toward the scene.
    pub fn scale_factor(&self, notches: f64) -> f64 {
        if notches >= 0.0 {
            self.zoom_in_factor.powf(notches)
        } else {
            self.zoom_out_factor.powf(-notches)
        }
    }
}

/// Convert a cursor position in logical pixels (origin top left, y down) into normalized device
/// coordinates (origin at the center, y up).
pub fn cursor_to_ndc(cursor: Vec2, window_size: Vec2) -> Option<DVec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    let uv = cursor.as_dvec2() / window_size.as_dvec2();
    Some(DVec2::new(uv.x * 2.0 - 1.0, 1.0 - uv.y * 2.0))
}

/// Sends mouse drags and wheel scrolling to every [`Interactor`].
pub fn default_camera_inputs(
    settings: Res<MouseInputSettings>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut wheel: EventReader<MouseWheel>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut cameras: Query<&mut Interactor>,
) {
    let notches: f64 = wheel
        .read()
        .map(|event| match event.unit {
            MouseScrollUnit::Line => event.y as f64,
            MouseScrollUnit::Pixel => event.y as f64 / settings.pixels_per_notch,
        })
        .sum();

    // Button releases and wheel notches are honored even with the cursor outside the window.
    let pointer = windows.get_single().ok().and_then(|window| {
        window
            .cursor_position()
            .and_then(|cursor| cursor_to_ndc(cursor, window.size()))
    });

    let action = settings.action(&buttons);
    for mut interactor in cameras.iter_mut() {
        if action == Action::None && notches != 0.0 {
            let at = pointer.unwrap_or(DVec2::ZERO);
            interactor.begin_drag(Action::Scale);
            let factor = settings.scale_factor(notches);
            interactor.track(DMat4::IDENTITY, at.x, at.y, factor);
            interactor.begin_drag(Action::None);
            continue;
        }
        interactor.begin_drag(action);
        if let Some(pointer) = pointer.filter(|_| action != Action::None) {
            interactor.track(DMat4::IDENTITY, pointer.x, pointer.y, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_corners_map_to_ndc() {
        let size = Vec2::new(800.0, 600.0);
        let top_left = cursor_to_ndc(Vec2::ZERO, size).unwrap();
        assert_eq!(top_left, DVec2::new(-1.0, 1.0));
        let center = cursor_to_ndc(Vec2::new(400.0, 300.0), size).unwrap();
        assert_eq!(center, DVec2::ZERO);
        assert!(cursor_to_ndc(Vec2::ZERO, Vec2::ZERO).is_none());
    }

    #[test]
    fn wheel_notches_scale_in_and_out() {
        let settings = MouseInputSettings::default();
        assert!((settings.scale_factor(1.0) - 0.9).abs() < 1e-12);
        assert!((settings.scale_factor(-1.0) - 1.1).abs() < 1e-12);
        assert!((settings.scale_factor(2.0) - 0.81).abs() < 1e-12);
    }

    #[test]
    fn rotate_wins_over_pan() {
        let settings = MouseInputSettings::default();
        let mut buttons = ButtonInput::<MouseButton>::default();
        assert_eq!(settings.action(&buttons), Action::None);
        buttons.press(MouseButton::Right);
        assert_eq!(settings.action(&buttons), Action::Pan);
        buttons.press(MouseButton::Left);
        assert_eq!(settings.action(&buttons), Action::Rotate);
    }
}

//! A `bevy_interactor_cam` extension that draws the path of rail cameras in the scene, with a
//! marker at the camera's current point. This makes it obvious to users where a rail camera can
//! go and how far along it they are.

use bevy_app::prelude::*;
use bevy_color::Color;
use bevy_ecs::prelude::*;
use bevy_gizmos::prelude::*;
use bevy_math::prelude::*;
use bevy_reflect::prelude::*;
use bevy_transform::TransformSystem;

use crate::prelude::*;

/// See the [module](self) docs.
pub struct PathIndicatorPlugin;

impl Plugin for PathIndicatorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            PostUpdate,
            draw_path.after(TransformSystem::TransformPropagate),
        )
        .register_type::<PathIndicator>();
    }
}

/// Optional. Configures whether or not a rail [`Interactor`] should show its path. The indicator
/// will be enabled if this component is not present.
#[derive(Debug, Component, Reflect)]
pub struct PathIndicator {
    /// Should the indicator be visible on this camera?
    pub enabled: bool,
}

impl Default for PathIndicator {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Use gizmos to draw rail paths in world space.
pub fn draw_path(cameras: Query<(&Interactor, Option<&PathIndicator>)>, mut gizmos: Gizmos) {
    for (interactor, _) in cameras
        .iter()
        .filter(|(.., indicator)| indicator.map(|i| i.enabled).unwrap_or(true))
    {
        if interactor.kind() != InteractorKind::Rail || interactor.path().is_empty() {
            continue;
        }
        let transform = interactor.options().path_transform;
        let to_world = |point: bevy_math::DVec3| {
            transform
                .map_or(point, |transform| transform.transform_point3(point))
                .as_vec3()
        };

        let gizmo_color = || Color::srgb(1.0, 0.8, 0.2);
        gizmos.linestrip(
            interactor.path().points().iter().copied().map(to_world),
            gizmo_color(),
        );

        let Some(position) = interactor.rail_position() else {
            continue;
        };
        let position = interactor
            .scene_bounds()
            .denormalize_point(position)
            .as_vec3();
        let arm = 0.02 / interactor.scene_bounds().scale() as f32;
        for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
            gizmos.line(position - axis * arm, position + axis * arm, gizmo_color());
        }
    }
}

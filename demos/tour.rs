//! A panning turntable camera that can be dragged around a few boxes, or sent on a tour of saved
//! views.

use std::time::Duration;

use bevy::prelude::*;
use bevy_interactor_cam::prelude::*;

fn main() {
    App::new()
        .add_plugins((
            DefaultPlugins,
            DefaultInteractorPlugins, // Step 1: Add camera interactor plugins
        ))
        .insert_resource(SceneBounds::from_sphere(bevy::math::DVec3::ZERO, 2.0))
        .add_systems(Startup, (setup_camera, setup_scene))
        .add_systems(Update, keyboard_tour)
        .run();
}

fn setup_camera(mut commands: Commands) {
    let view = |phi, theta, distance| CameraState::Turntable {
        phi,
        theta,
        distance,
    };
    let options = InteractorOptions {
        start_theta: 25.0,
        min_max_theta: [-10.0, 80.0],
        path_states: vec![
            Waypoint::new("Front", view(0.0, 15.0, 1.5)),
            Waypoint::new("Side", view(90.0, 30.0, 2.0)),
            Waypoint::new("Top", view(180.0, 75.0, 3.0)).with_duration(Duration::from_secs(2)),
        ],
        path_circular: true,
        ..Default::default()
    };
    commands.spawn((
        Camera3d::default(),
        // Step 2: add an interactor to any camera
        Interactor::turntable_pan(options)
            .with_arrival_listener(|state| info!("Arrived at {state:?}")),
    ));
}

/// Space walks through the tour, R jumps back to the start.
fn keyboard_tour(
    keys: Res<ButtonInput<KeyCode>>,
    mut cameras: Query<(Entity, &mut Interactor)>,
    mut triggers: EventWriter<AnimateToTrigger>,
) {
    for (camera, mut interactor) in cameras.iter_mut() {
        if keys.just_pressed(KeyCode::Space) {
            triggers.send(AnimateToTrigger::resume_tour(camera));
        }
        if keys.just_pressed(KeyCode::KeyR) {
            interactor.reset();
        }
    }
}

//
// --- The below code is not important for the example ---
//

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let cube = meshes.add(Cuboid::new(0.5, 0.5, 0.5));
    let colors = [
        Color::srgb(0.9, 0.3, 0.2),
        Color::srgb(0.2, 0.7, 0.3),
        Color::srgb(0.2, 0.4, 0.9),
    ];
    for (i, color) in colors.into_iter().enumerate() {
        commands.spawn((
            Mesh3d(cube.clone()),
            MeshMaterial3d(materials.add(color)),
            Transform::from_xyz(i as f32 - 1.0, 0.25, 0.0),
        ));
    }
    commands.spawn((
        DirectionalLight::default(),
        Transform::from_xyz(1.0, 2.0, 1.5).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    let text = "Left Mouse - Rotate\nRight Mouse - Pan\nScroll - Zoom\nSpace - Tour\nR - Reset";
    commands.spawn((
        Text::new(text),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        Node {
            margin: UiRect::all(Val::Px(20.0)),
            ..Default::default()
        },
    ));
}

//! Snapshots of camera state, the interaction [`Action`], and the degrees of freedom of each
//! [`InteractorKind`].

use bevy_math::{DQuat, DVec3};
use bevy_reflect::prelude::*;

/// What pointer samples sent to [`Interactor::track`](super::component::Interactor::track) do.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Action {
    /// Samples are ignored.
    #[default]
    None,
    /// Turn the camera about the scene (or look around, on a rail).
    Rotate,
    /// Translate the camera along its local axes.
    Pan,
    /// Zoom by a factor (or step along the path, on a rail).
    Scale,
}

/// How an interactor represents and changes orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum RotationModel {
    /// Independent turn (phi) and tilt (theta) angles.
    EulerPair,
    /// An unconstrained orientation, changed by virtual trackball drags.
    Quaternion,
    /// A position along a path, plus a turn and tilt to look around from it.
    PathOffset,
}

/// The degrees of freedom of an interactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct Capabilities {
    /// How orientation is represented.
    pub rotation: RotationModel,
    /// Can the camera be translated sideways?
    pub has_pan: bool,
    /// Does the camera have a distance to the scene center?
    pub has_zoom: bool,
}

/// The navigation metaphor of an interactor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum InteractorKind {
    /// Turn and tilt about the scene center, plus zoom.
    #[default]
    Turntable,
    /// A turntable that can also pan its center.
    TurntablePan,
    /// Unconstrained rotation about the scene center, plus pan and zoom.
    Sphere,
    /// Travel along a fixed path, looking around from the current point.
    Rail,
}

impl InteractorKind {
    /// The degrees of freedom this kind of interactor exposes.
    pub const fn capabilities(self) -> Capabilities {
        match self {
            InteractorKind::Turntable => Capabilities {
                rotation: RotationModel::EulerPair,
                has_pan: false,
                has_zoom: true,
            },
            InteractorKind::TurntablePan => Capabilities {
                rotation: RotationModel::EulerPair,
                has_pan: true,
                has_zoom: true,
            },
            InteractorKind::Sphere => Capabilities {
                rotation: RotationModel::Quaternion,
                has_pan: true,
                has_zoom: true,
            },
            InteractorKind::Rail => Capabilities {
                rotation: RotationModel::PathOffset,
                has_pan: false,
                has_zoom: false,
            },
        }
    }
}

/// A snapshot of everything that positions the camera. Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum CameraState {
    /// State of a [`InteractorKind::Turntable`].
    Turntable {
        /// Turn about the vertical axis.
        phi: f64,
        /// Tilt about the horizontal axis.
        theta: f64,
        /// Distance from the center of the scene.
        distance: f64,
    },
    /// State of a [`InteractorKind::TurntablePan`].
    TurntablePan {
        /// Turn about the vertical axis.
        phi: f64,
        /// Tilt about the horizontal axis.
        theta: f64,
        /// Point the camera orbits, in normalized scene space.
        pan: DVec3,
        /// Distance from the pan point.
        distance: f64,
    },
    /// State of a [`InteractorKind::Sphere`].
    Sphere {
        /// Rotation applied to the scene.
        orientation: DQuat,
        /// Point the camera orbits, in normalized scene space.
        pan: DVec3,
        /// Distance from the pan point.
        distance: f64,
    },
    /// State of a [`InteractorKind::Rail`].
    Rail {
        /// Turn about the vertical axis.
        phi: f64,
        /// Tilt about the horizontal axis.
        theta: f64,
        /// Position along the path, in `[0, 1]`.
        path_offset: f64,
    },
}

/// Every field any camera state can carry, each optional. Used to apply a state of one kind to an
/// interactor of another, and to fill partial states.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub(crate) struct StateFields {
    pub phi: Option<f64>,
    pub theta: Option<f64>,
    pub distance: Option<f64>,
    pub pan: Option<DVec3>,
    pub orientation: Option<DQuat>,
    pub path_offset: Option<f64>,
}

impl CameraState {
    /// The kind of interactor this state belongs to.
    pub fn kind(&self) -> InteractorKind {
        match self {
            CameraState::Turntable { .. } => InteractorKind::Turntable,
            CameraState::TurntablePan { .. } => InteractorKind::TurntablePan,
            CameraState::Sphere { .. } => InteractorKind::Sphere,
            CameraState::Rail { .. } => InteractorKind::Rail,
        }
    }

    /// The state as a flat array, in the conventional field order of its kind:
    ///
    /// - Turntable: `[phi, theta, distance]`
    /// - TurntablePan: `[phi, theta, pan_x, pan_y, pan_z, distance]`
    /// - Sphere: `[qx, qy, qz, qw, pan_x, pan_y, pan_z, distance]`
    /// - Rail: `[phi, theta, path_offset]`
    pub fn components(&self) -> Vec<f64> {
        match *self {
            CameraState::Turntable {
                phi,
                theta,
                distance,
            } => vec![phi, theta, distance],
            CameraState::TurntablePan {
                phi,
                theta,
                pan,
                distance,
            } => vec![phi, theta, pan.x, pan.y, pan.z, distance],
            CameraState::Sphere {
                orientation,
                pan,
                distance,
            } => vec![
                orientation.x,
                orientation.y,
                orientation.z,
                orientation.w,
                pan.x,
                pan.y,
                pan.z,
                distance,
            ],
            CameraState::Rail {
                phi,
                theta,
                path_offset,
            } => vec![phi, theta, path_offset],
        }
    }

    /// Rebuild a state of this state's kind from a flat array in [`CameraState::components`]
    /// order. Missing or non-finite entries keep the value from `self`; extra entries are ignored.
    pub fn with_components(&self, values: &[f64]) -> Self {
        let mut merged = self.components();
        for (slot, value) in merged.iter_mut().zip(values) {
            if value.is_finite() {
                *slot = *value;
            }
        }
        let v = merged;
        match self {
            CameraState::Turntable { .. } => CameraState::Turntable {
                phi: v[0],
                theta: v[1],
                distance: v[2],
            },
            CameraState::TurntablePan { .. } => CameraState::TurntablePan {
                phi: v[0],
                theta: v[1],
                pan: DVec3::new(v[2], v[3], v[4]),
                distance: v[5],
            },
            CameraState::Sphere { .. } => CameraState::Sphere {
                orientation: DQuat::from_xyzw(v[0], v[1], v[2], v[3]),
                pan: DVec3::new(v[4], v[5], v[6]),
                distance: v[7],
            },
            CameraState::Rail { .. } => CameraState::Rail {
                phi: v[0],
                theta: v[1],
                path_offset: v[2],
            },
        }
    }

    pub(crate) fn fields(&self) -> StateFields {
        match *self {
            CameraState::Turntable {
                phi,
                theta,
                distance,
            } => StateFields {
                phi: Some(phi),
                theta: Some(theta),
                distance: Some(distance),
                ..Default::default()
            },
            CameraState::TurntablePan {
                phi,
                theta,
                pan,
                distance,
            } => StateFields {
                phi: Some(phi),
                theta: Some(theta),
                distance: Some(distance),
                pan: Some(pan),
                ..Default::default()
            },
            CameraState::Sphere {
                orientation,
                pan,
                distance,
            } => StateFields {
                orientation: Some(orientation),
                pan: Some(pan),
                distance: Some(distance),
                ..Default::default()
            },
            CameraState::Rail {
                phi,
                theta,
                path_offset,
            } => StateFields {
                phi: Some(phi),
                theta: Some(theta),
                path_offset: Some(path_offset),
                ..Default::default()
            },
        }
    }
}

//! Quaternion helpers for the free trackball: shortest-arc interpolation and the virtual sphere
//! used to turn two pointer samples into a rotation.

use std::f64::consts::{FRAC_1_SQRT_2, SQRT_2};

use bevy_math::{DQuat, DVec2, DVec3};

/// Below this `sin(θ/2)` the interpolation weights of [`slerp`] are numerically meaningless, and
/// the endpoints are blended component-wise instead.
pub const SLERP_DEGENERATE_SIN: f64 = 1e-6;

/// Spherical linear interpolation from `from` to `to` by `t` in `[0, 1]`, along the shortest arc.
///
/// `to` is flipped into the same hemisphere as `from` first, since `q` and `-q` describe the same
/// rotation. When the two rotations are (nearly) identical the arc length vanishes, and the
/// result is a normalized component-wise blend weighted by `t`.
pub fn slerp(from: DQuat, to: DQuat, t: f64) -> DQuat {
    let mut cos_half = from.dot(to);
    let mut to = to;
    if cos_half < 0.0 {
        to = -to;
        cos_half = -cos_half;
    }
    let cos_half = cos_half.min(1.0);
    let sin_half = (1.0 - cos_half * cos_half).sqrt();

    if sin_half < SLERP_DEGENERATE_SIN {
        let blended = from * (1.0 - t) + to * t;
        return if blended.length_squared() > 0.0 {
            blended.normalize()
        } else {
            from
        };
    }

    let half = cos_half.acos();
    let weight_from = ((1.0 - t) * half).sin() / sin_half;
    let weight_to = (t * half).sin() / sin_half;
    from * weight_from + to * weight_to
}

/// The rotation angle, in radians, between two orientations along the shortest arc.
pub fn angle_between(a: DQuat, b: DQuat) -> f64 {
    2.0 * a.dot(b).abs().min(1.0).acos()
}

/// Orientation of a turn `phi` about +Y followed by a tilt `theta` about +X, both in radians.
///
/// This is the rotation part shared by every Euler-pair camera: `Rx(theta) * Ry(phi)`.
pub fn euler_pair(phi: f64, theta: f64) -> DQuat {
    DQuat::from_rotation_x(theta) * DQuat::from_rotation_y(phi)
}

/// Project a pointer position onto the virtual trackball of radius `radius`.
///
/// Inside `radius / √2` of the center the point lands on the sphere itself. Outside, it lands on a
/// hyperbolic sheet `z = (r / √2)² / d` that meets the sphere smoothly, so dragging past the edge of
/// the ball keeps rotating instead of stalling.
pub fn project_on_trackball(point: DVec2, radius: f64) -> DVec3 {
    let d = point.length();
    let z = if d < radius * FRAC_1_SQRT_2 {
        (radius * radius - d * d).sqrt()
    } else {
        let t = radius / SQRT_2;
        t * t / d
    };
    point.extend(z)
}

/// The rotation that drags the trackball from pointer position `from` to `to`.
///
/// The axis is the cross product of the two projected points and the angle its magnitude.
/// Returns `None` when the pointer did not move enough to define an axis.
pub fn trackball_rotation(from: DVec2, to: DVec2, radius: f64) -> Option<DQuat> {
    let axis = project_on_trackball(from, radius).cross(project_on_trackball(to, radius));
    let angle = axis.length();
    (angle > f64::EPSILON && angle.is_finite())
        .then(|| DQuat::from_axis_angle(axis / angle, angle))
}

//! Provides [`RailPath`], a 3D polyline parametrized by normalized arc length.

use bevy_math::{DMat4, DVec3};
use bevy_reflect::prelude::*;

use super::limits::wrap;

/// A polyline the rail camera travels along, addressed by an offset in `[0, 1]`.
///
/// Offset `0` is the first control point and `1` the last (or the first again, for a circular
/// path). Offsets in between are proportional to the distance travelled along the polyline, so a
/// constant offset rate gives a constant camera speed.
#[derive(Debug, Clone, Default, PartialEq, Reflect)]
pub struct RailPath {
    points: Vec<DVec3>,
    /// Cumulative distance from the first point, normalized by total length. Same length as
    /// `points`, monotonically non-decreasing, ending at `1.0` unless the path is degenerate.
    offsets: Vec<f64>,
    length: f64,
    circular: bool,
}

impl RailPath {
    /// Build a path through `points`. A circular path is closed by repeating the first point.
    pub fn new(points: &[DVec3], circular: bool) -> Self {
        let mut points: Vec<DVec3> = points.iter().copied().filter(|p| p.is_finite()).collect();
        if circular && points.len() > 1 {
            points.push(points[0]);
        }

        let mut offsets = Vec::with_capacity(points.len());
        let mut length = 0.0;
        for (i, point) in points.iter().enumerate() {
            if i > 0 {
                length += point.distance(points[i - 1]);
            }
            offsets.push(length);
        }
        if length > f64::EPSILON {
            offsets.iter_mut().for_each(|offset| *offset /= length);
        } else {
            offsets.iter_mut().for_each(|offset| *offset = 0.0);
        }

        Self {
            points,
            offsets,
            length,
            circular,
        }
    }

    /// The control points, including the closing point of a circular path.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Total length of the polyline in path space units.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Does the offset wrap around at the ends?
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Is there nothing to travel along?
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bring an arbitrary offset back onto the path: wrapped into `[0, 1)` when circular,
    /// saturated to `[0, 1]` otherwise.
    pub fn normalize_offset(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return 0.0;
        }
        if self.circular {
            wrap(offset, 1.0)
        } else {
            offset.clamp(0.0, 1.0)
        }
    }

    /// Offset reached after moving `step` along the path from `offset`.
    pub fn step(&self, offset: f64, step: f64) -> f64 {
        self.normalize_offset(offset + step)
    }

    /// The point in path space at `offset`, or `None` for an empty path.
    ///
    /// Locates the segment bracketing the offset by scanning the offsets in order, then linearly
    /// interpolates between its end points.
    pub fn sample(&self, offset: f64) -> Option<DVec3> {
        let first = *self.points.first()?;
        let offset = self.normalize_offset(offset);
        if self.points.len() == 1 || self.length <= f64::EPSILON {
            return Some(first);
        }

        for i in 1..self.points.len() {
            let (start, end) = (self.offsets[i - 1], self.offsets[i]);
            if offset <= end {
                let span = end - start;
                let t = if span > 0.0 { (offset - start) / span } else { 0.0 };
                return Some(self.points[i - 1].lerp(self.points[i], t));
            }
        }
        self.points.last().copied()
    }

    /// The point at `offset` after applying the optional caller-supplied space transform.
    pub fn sample_transformed(&self, offset: f64, transform: Option<&DMat4>) -> Option<DVec3> {
        let point = self.sample(offset)?;
        Some(match transform {
            Some(transform) => transform.transform_point3(point),
            None => point,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(circular: bool) -> RailPath {
        RailPath::new(
            &[
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            circular,
        )
    }

    #[test]
    fn offsets_follow_arc_length() {
        let open = square(false);
        assert_eq!(open.length(), 3.0);
        let p = open.sample(0.5).unwrap();
        assert!(p.abs_diff_eq(DVec3::new(1.0, 0.5, 0.0), 1e-12));
    }

    #[test]
    fn circular_path_closes_on_first_point() {
        let closed = square(true);
        assert_eq!(closed.length(), 4.0);
        assert_eq!(closed.points().len(), 5);
        let near_end = closed.sample(0.999_999).unwrap();
        assert!(near_end.abs_diff_eq(DVec3::ZERO, 1e-5));
        assert_eq!(closed.sample(1.0), closed.sample(0.0));
    }

    #[test]
    fn open_path_saturates() {
        let open = square(false);
        assert_eq!(open.step(0.95, 0.1), 1.0);
        assert_eq!(open.step(0.05, -0.1), 0.0);
        assert_eq!(open.sample(2.0), Some(DVec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn circular_path_wraps() {
        let closed = square(true);
        assert!((closed.step(0.95, 0.1) - 0.05).abs() < 1e-12);
        assert!((closed.step(0.05, -0.1) - 0.95).abs() < 1e-12);
    }

    #[test]
    fn empty_path_has_no_position() {
        let empty = RailPath::new(&[], true);
        assert!(empty.is_empty());
        assert_eq!(empty.sample(0.3), None);
        assert_eq!(empty.normalize_offset(0.3), 0.3);
    }

    #[test]
    fn degenerate_path_stays_on_its_point() {
        let point = DVec3::new(2.0, 3.0, 4.0);
        let single = RailPath::new(&[point, point], false);
        assert_eq!(single.length(), 0.0);
        assert_eq!(single.sample(0.7), Some(point));
    }

    #[test]
    fn transform_is_applied_after_sampling() {
        let open = square(false);
        let transform = DMat4::from_translation(DVec3::new(0.0, 0.0, 5.0));
        let p = open.sample_transformed(0.0, Some(&transform)).unwrap();
        assert_eq!(p, DVec3::new(0.0, 0.0, 5.0));
    }
}

//! Provides [`Limits`], the `[low, high]` bound attached to every clamped camera field, and the
//! wrap helpers used to resolve rotation direction.

use bevy_log::prelude::*;
use bevy_reflect::Reflect;

/// Bound a single camera field, in the units the field is configured in.
///
/// Limits absorb out-of-range input instead of rejecting it: [`Limits::clamp`] always returns a
/// value inside the bound.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Limits {
    /// The smallest allowed value.
    pub low: f64,
    /// The largest allowed value.
    pub high: f64,
}

impl Limits {
    /// The sentinel turn bound, in degrees, that disables clamping of a turn angle entirely.
    pub const FREE_SPIN_DEGREES: [f64; 2] = [-180.0, 180.0];

    /// Create limits from a `[low, high]` pair.
    ///
    /// Reversed pairs are swapped and non-finite pairs fall back to `fallback`, so a malformed
    /// configuration still produces a usable bound.
    pub fn new(pair: [f64; 2], fallback: [f64; 2]) -> Self {
        let [mut low, mut high] = pair;
        if !low.is_finite() || !high.is_finite() {
            warn_once!("Non-finite camera bound {pair:?}, falling back to {fallback:?}");
            [low, high] = fallback;
        }
        if low > high {
            warn_once!("Reversed camera bound {pair:?}, swapping");
            std::mem::swap(&mut low, &mut high);
        }
        Self { low, high }
    }

    /// Is this a turn bound configured with the free spin sentinel?
    pub fn is_free_spin_degrees(pair: [f64; 2]) -> bool {
        pair == Self::FREE_SPIN_DEGREES
    }

    /// The nearest value inside the bound. NaN maps to the lower bound.
    pub fn clamp(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.low;
        }
        value.clamp(self.low, self.high)
    }

    /// Is `value` inside the bound, with `tolerance` slack on both ends?
    pub fn contains(&self, value: f64, tolerance: f64) -> bool {
        value >= self.low - tolerance && value <= self.high + tolerance
    }
}

/// Wrap `value` into `[0, period)`.
pub fn wrap(value: f64, period: f64) -> f64 {
    let wrapped = value.rem_euclid(period);
    // rem_euclid can round up to exactly `period` for tiny negative inputs.
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Resolve the shorter way around a periodic axis.
///
/// Both values are normalized into `[0, period)`; the target is then shifted by one period if
/// that makes the travel no longer than half a period. Returns `(current, target)` in the same
/// unwrapped frame, ready to be interpolated linearly.
pub fn shortest_direction(current: f64, target: f64, period: f64) -> (f64, f64) {
    let current = wrap(current, period);
    let mut target = wrap(target, period);
    let half = period / 2.0;
    if target - current > half {
        target -= period;
    } else if current - target > half {
        target += period;
    }
    (current, target)
}

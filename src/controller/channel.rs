//! Provides [`AnimationChannel`], the per-field easing scheduler shared by every interactor.

use bevy_reflect::prelude::*;

/// Distance under which a channel is considered to have reached its target, on top of the
/// distance it can cover in one step. Absorbs the rounding left over when a duration is split
/// into many small frame deltas.
pub const ARRIVAL_EPSILON: f64 = 1e-9;

/// A single animated scalar: where it is, where it is going, and how fast it gets there.
///
/// Channels move at a constant rate. Several channels are kept in lockstep by giving each the
/// rate that covers its own travel in a shared duration, see [`AnimationChannel::sync_to`].
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct AnimationChannel {
    /// The value observed this frame.
    pub current: f64,
    /// The value the channel is moving toward.
    pub target: f64,
    /// Units per second. Always non-negative.
    pub rate: f64,
}

impl Default for AnimationChannel {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl AnimationChannel {
    /// A channel resting at `value`.
    pub fn new(value: f64) -> Self {
        Self {
            current: value,
            target: value,
            rate: 0.0,
        }
    }

    /// Jump to `value` and stop moving.
    pub fn set(&mut self, value: f64) {
        *self = Self::new(value);
    }

    /// Stop where the channel currently is.
    pub fn cancel(&mut self) {
        self.target = self.current;
        self.rate = 0.0;
    }

    /// Absolute distance left to travel.
    pub fn travel(&self) -> f64 {
        (self.target - self.current).abs()
    }

    /// Is the channel at its target?
    pub fn is_settled(&self) -> bool {
        self.travel() <= ARRIVAL_EPSILON
    }

    /// Time this channel would need to reach its target on its own at `nominal_speed`.
    pub fn time_at(&self, nominal_speed: f64) -> f64 {
        if nominal_speed > 0.0 && nominal_speed.is_finite() {
            self.travel() / nominal_speed
        } else {
            0.0
        }
    }

    /// Set the rate so the remaining travel is covered in exactly `duration` seconds. A
    /// non-positive duration makes the channel arrive on the next non-zero step.
    pub fn sync_to(&mut self, duration: f64) {
        self.rate = if duration > 0.0 {
            self.travel() / duration
        } else {
            f64::MAX
        };
    }

    /// Move toward the target by `rate * dt`. Once the target is within one step, snap to it
    /// exactly instead of overshooting. Returns `true` when the channel has arrived.
    pub fn advance(&mut self, dt: f64) -> bool {
        let remaining = self.target - self.current;
        let step = self.rate * dt.max(0.0);
        if remaining.abs() <= step + ARRIVAL_EPSILON {
            self.current = self.target;
            return true;
        }
        self.current += step.copysign(remaining);
        false
    }
}

//! Stamina Pool
//!
//! A clamped resource that gates sprint and roll.
//! Every mutation clamps to `[0, max]`.

use serde::{Deserialize, Serialize};

/// Depletable, regenerating stamina.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stamina {
    current: f32,
    max: f32,
}

impl Stamina {
    /// Create a full pool.
    pub fn full(max: f32) -> Self {
        Self { current: max, max }
    }

    /// Create a pool at a given level (clamped).
    pub fn with_current(current: f32, max: f32) -> Self {
        Self { current: current.clamp(0.0, max), max }
    }

    /// Current value.
    #[inline]
    pub fn current(&self) -> f32 {
        self.current
    }

    /// Capacity.
    #[inline]
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Any stamina left at all?
    #[inline]
    pub fn has_any(&self) -> bool {
        self.current > 0.0
    }

    /// Enough stamina for a cost?
    #[inline]
    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    /// Remove a fixed amount, clamped at zero.
    pub fn spend(&mut self, amount: f32) {
        self.current = (self.current - amount).clamp(0.0, self.max);
    }

    /// Drain `rate` per second for `dt` seconds, clamped at zero.
    pub fn drain(&mut self, rate: f32, dt: f32) {
        self.spend(rate * dt);
    }

    /// Regenerate `rate` per second for `dt` seconds, clamped at max.
    pub fn regen(&mut self, rate: f32, dt: f32) {
        self.current = (self.current + rate * dt).clamp(0.0, self.max);
    }

    /// Overwrite the current value (clamped).
    pub fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
    }
}

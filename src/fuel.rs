//! Finite fuel reserve gating the craft's thrusters.

use log::trace;

use crate::FUEL_MAX;

/// Remaining fuel, always within `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelGauge {
    amount: f32,
    max: f32,
}

impl Default for FuelGauge {
    fn default() -> Self {
        Self::full(FUEL_MAX)
    }
}

impl FuelGauge {
    /// Creates a full tank holding `max` units.
    ///
    /// Negative or non-finite capacities are treated as an empty tank.
    ///
    /// # Examples
    ///
    /// ```
    /// use lander::FuelGauge;
    /// let gauge = FuelGauge::full(10.0);
    /// assert_eq!(gauge.amount(), 10.0);
    /// assert_eq!(gauge.normalized(), 1.0);
    /// ```
    #[must_use]
    pub fn full(max: f32) -> Self {
        let capacity = if max.is_finite() { max.max(0.0) } else { 0.0 };
        Self {
            amount: capacity,
            max: capacity,
        }
    }

    /// Subtracts `rate * dt`, never dropping below zero.
    pub fn consume(&mut self, rate: f32, dt: f32) {
        let drained = (rate * dt).max(0.0);
        if !drained.is_finite() {
            return;
        }
        self.amount = (self.amount - drained).clamp(0.0, self.max);
        trace!("fuel drained by {drained:.4}, {:.4} left", self.amount);
    }

    /// Adds `amount`, never exceeding the tank's capacity.
    pub fn refuel(&mut self, amount: f32) {
        let added = amount.max(0.0);
        if !added.is_finite() {
            return;
        }
        self.amount = (self.amount + added).clamp(0.0, self.max);
    }

    /// Current fuel level.
    #[must_use]
    pub const fn amount(&self) -> f32 {
        self.amount
    }

    /// Tank capacity.
    #[must_use]
    pub const fn max(&self) -> f32 {
        self.max
    }

    /// Fuel level as a fraction of capacity in `[0, 1]`.
    #[must_use]
    pub fn normalized(&self) -> f32 {
        if self.max > 0.0 {
            self.amount / self.max
        } else {
            0.0
        }
    }

    /// Whether the tank is dry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amount <= 0.0
    }
}

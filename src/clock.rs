//! Simulation rate control and fixed-step scheduling.
//!
//! [`TimeScale`] is the single shared rate multiplier: `0.0` freezes every
//! step, `1.0` runs in real time. [`FixedTimestep`] turns scaled frame time
//! into a whole number of fixed physics steps.

use std::cell::Cell;

use log::warn;

use crate::{FIXED_DELTA_TIME, MAX_STEPS_PER_FRAME};

/// Global simulation rate multiplier.
#[derive(Debug)]
pub struct TimeScale {
    rate: Cell<f32>,
}

impl Default for TimeScale {
    fn default() -> Self {
        Self::running()
    }
}

impl TimeScale {
    /// Creates a scale running at normal speed.
    #[must_use]
    pub const fn running() -> Self {
        Self {
            rate: Cell::new(1.0),
        }
    }

    /// Current multiplier.
    #[must_use]
    pub fn rate(&self) -> f32 {
        self.rate.get()
    }

    /// Sets the multiplier; negative or non-finite values freeze time.
    pub fn set_rate(&self, rate: f32) {
        let sanitized = if rate.is_finite() { rate.max(0.0) } else { 0.0 };
        self.rate.set(sanitized);
    }

    /// Whether time is frozen.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.rate.get() <= 0.0
    }
}

/// Accumulates scaled frame time and releases it in fixed steps.
#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    step: f64,
    max_steps: u32,
    accumulator: f64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(FIXED_DELTA_TIME, MAX_STEPS_PER_FRAME)
    }
}

impl FixedTimestep {
    /// Creates a scheduler emitting steps of `step` seconds, at most
    /// `max_steps` per frame.
    ///
    /// A non-positive step falls back to the default step length.
    #[must_use]
    pub fn new(step: f32, max_steps: u32) -> Self {
        let length = if step.is_finite() && step > 0.0 {
            step
        } else {
            warn!("invalid fixed step {step}; using {FIXED_DELTA_TIME}");
            FIXED_DELTA_TIME
        };
        Self {
            step: f64::from(length),
            max_steps: max_steps.max(1),
            accumulator: 0.0,
        }
    }

    /// Length of one step in seconds.
    #[must_use]
    pub fn step(&self) -> f32 {
        crate::numeric::expect_f32(self.step)
    }

    /// Adds `frame_dt` scaled by `scale` and returns how many steps to run.
    ///
    /// Time beyond `max_steps` steps is discarded so a long stall does not
    /// snowball into ever longer frames.
    pub fn advance(&mut self, frame_dt: f32, scale: &TimeScale) -> u32 {
        if scale.is_frozen() || !frame_dt.is_finite() || frame_dt <= 0.0 {
            return 0;
        }
        self.accumulator += f64::from(frame_dt) * f64::from(scale.rate());

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_steps && self.accumulator >= self.step {
            warn!("dropping {:.3}s of simulation time", self.accumulator);
            self.accumulator %= self.step;
        }
        steps
    }

    /// Discards any partially accumulated step.
    pub const fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case(2.0, 2.0)]
    #[case(-1.0, 0.0)]
    #[case(f32::NAN, 0.0)]
    fn set_rate_sanitises(#[case] input: f32, #[case] expected: f32) {
        let scale = TimeScale::running();
        scale.set_rate(input);
        assert_relative_eq!(scale.rate(), expected);
    }

    #[rstest]
    fn frozen_scale_produces_no_steps() {
        let scale = TimeScale::running();
        scale.set_rate(0.0);
        let mut timestep = FixedTimestep::new(0.02, 8);
        assert_eq!(timestep.advance(1.0, &scale), 0);
        scale.set_rate(1.0);
        assert_eq!(timestep.advance(0.01, &scale), 0);
    }

    #[rstest]
    fn partial_steps_carry_over() {
        let scale = TimeScale::running();
        let mut timestep = FixedTimestep::new(0.25, 8);
        assert_eq!(timestep.advance(0.375, &scale), 1);
        assert_eq!(timestep.advance(0.125, &scale), 1);
    }

    #[rstest]
    fn long_frames_are_capped() {
        let scale = TimeScale::running();
        let mut timestep = FixedTimestep::new(0.25, 2);
        assert_eq!(timestep.advance(10.0, &scale), 2);
        assert_eq!(timestep.advance(0.0625, &scale), 0);
    }

    #[rstest]
    fn invalid_step_uses_default() {
        let timestep = FixedTimestep::new(0.0, 0);
        assert_relative_eq!(timestep.step(), FIXED_DELTA_TIME);
    }
}

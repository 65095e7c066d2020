//! Read-only snapshot of the session for HUDs and autopilots.

use glam::Vec2;

use crate::lander::{Lander, LanderState};
use crate::numeric::expect_f32;
use crate::physics::PhysicsBody;
use crate::run::RunState;

/// Everything a heads-up display shows, captured at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Telemetry {
    /// Craft lifecycle.
    pub state: LanderState,
    /// Craft centre.
    pub position: Vec2,
    /// Craft velocity.
    pub velocity: Vec2,
    /// Craft up axis.
    pub up: Vec2,
    /// Fuel remaining.
    pub fuel: f32,
    /// Fuel remaining as a fraction of capacity.
    pub fuel_normalized: f32,
    /// Height of the landing legs above the terrain.
    pub altitude: f32,
    /// One-based level number.
    pub level: u32,
    /// Score in the current level.
    pub level_score: u32,
    /// Banked score.
    pub total_score: u32,
    /// Active seconds across the session.
    pub elapsed: f32,
}

impl Telemetry {
    /// Captures the craft and session state.
    ///
    /// `ground_height` and `half_height` turn the craft position into an
    /// altitude above the terrain.
    #[must_use]
    pub fn capture<B: PhysicsBody>(
        lander: &Lander<B>,
        run: &RunState,
        ground_height: f32,
        half_height: f32,
    ) -> Self {
        let body = lander.body();
        let position = body.position();
        Self {
            state: lander.state(),
            position,
            velocity: body.velocity(),
            up: body.up(),
            fuel: lander.fuel().amount(),
            fuel_normalized: lander.fuel().normalized(),
            altitude: position.y - half_height - ground_height,
            level: run.level,
            level_score: run.level_score,
            total_score: run.total_score,
            elapsed: run.elapsed,
        }
    }

    /// Horizontal speed, positive to the right.
    #[must_use]
    pub const fn horizontal_speed(&self) -> f32 {
        self.velocity.x
    }

    /// Vertical speed, positive upwards.
    #[must_use]
    pub const fn vertical_speed(&self) -> f32 {
        self.velocity.y
    }

    /// Whole seconds and hundredths of active play, as a HUD clock shows.
    #[must_use]
    pub fn clock(&self) -> (u32, u32) {
        let hundredths = crate::numeric::round_score(f64::from(self.elapsed) * 100.0);
        (hundredths / 100, hundredths % 100)
    }

    /// Session score including the level in progress.
    #[must_use]
    pub const fn running_score(&self) -> u32 {
        self.total_score.saturating_add(self.level_score)
    }

    /// Mean fuel burned per active second, or zero before the clock starts.
    #[must_use]
    pub fn burn_rate(&self, fuel_max: f32) -> f32 {
        if self.elapsed <= 0.0 {
            return 0.0;
        }
        let burned = f64::from(fuel_max - self.fuel).max(0.0);
        expect_f32(burned / f64::from(self.elapsed))
    }
}

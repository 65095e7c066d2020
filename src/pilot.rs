//! Input sources for the craft.

use crate::flight::ControlInput;
use crate::telemetry::Telemetry;

/// Produces control input from the latest telemetry, once per fixed step.
pub trait Pilot {
    /// Chooses the inputs to hold for the next step.
    fn control(&mut self, telemetry: &Telemetry) -> ControlInput;
}

/// Replays a fixed input every step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldInput(pub ControlInput);

impl Pilot for HeldInput {
    fn control(&mut self, _telemetry: &Telemetry) -> ControlInput {
        self.0
    }
}

/// Bang-bang autopilot that keeps the craft upright and caps its sink rate.
///
/// The allowed sink rate shrinks with altitude so the craft arrives slowly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentPilot {
    /// Sink rate allowed far above the ground.
    pub cruise_descent: f32,
    /// Sink rate allowed at touchdown.
    pub touchdown_descent: f32,
    /// Altitude over which the allowed rate blends between the two.
    pub flare_altitude: f32,
    /// Largest sideways lean of the up axis before correcting.
    pub lean_tolerance: f32,
}

impl Default for DescentPilot {
    fn default() -> Self {
        Self {
            cruise_descent: 3.0,
            touchdown_descent: 1.0,
            flare_altitude: 6.0,
            lean_tolerance: 0.02,
        }
    }
}

impl DescentPilot {
    fn allowed_descent(&self, altitude: f32) -> f32 {
        if self.flare_altitude <= 0.0 {
            return self.touchdown_descent;
        }
        let blend = (altitude / self.flare_altitude).clamp(0.0, 1.0);
        self.touchdown_descent + (self.cruise_descent - self.touchdown_descent) * blend
    }
}

impl Pilot for DescentPilot {
    fn control(&mut self, telemetry: &Telemetry) -> ControlInput {
        let lean = telemetry.up.x;
        ControlInput {
            up: -telemetry.vertical_speed() > self.allowed_descent(telemetry.altitude),
            left: lean > self.lean_tolerance,
            right: lean < -self.lean_tolerance,
        }
    }
}

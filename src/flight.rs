//! Per-step thrust handling for the craft.

use std::rc::Rc;

use glam::Vec2;
use log::trace;
use serde::Deserialize;

use crate::events::{EventBus, LanderEvent};
use crate::fuel::FuelGauge;
use crate::physics::{ForceSpace, PhysicsBody};
use crate::{FUEL_CONSUMPTION_RATE, FUEL_MAX, FUEL_PICKUP_AMOUNT, THRUST_FORCE, TURN_TORQUE};

/// Control inputs held during one fixed step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ControlInput {
    /// Main engine.
    pub up: bool,
    /// Rotate counter-clockwise.
    pub left: bool,
    /// Rotate clockwise.
    pub right: bool,
}

impl ControlInput {
    /// No input held.
    pub const IDLE: Self = Self {
        up: false,
        left: false,
        right: false,
    };

    /// Whether any input is held.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.up || self.left || self.right
    }
}

/// Tunables for thrust and fuel.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct FlightSettings {
    /// Force applied along the craft's up axis, scaled by the step length.
    pub thrust_force: f32,
    /// Torque applied by a rotate input, scaled by the step length.
    pub turn_torque: f32,
    /// Fuel capacity.
    pub fuel_max: f32,
    /// Fuel drained per second while any input is held.
    pub fuel_consumption_rate: f32,
    /// Fuel restored by one fuel cell.
    pub fuel_pickup_amount: f32,
}

impl Default for FlightSettings {
    fn default() -> Self {
        Self {
            thrust_force: THRUST_FORCE,
            turn_torque: TURN_TORQUE,
            fuel_max: FUEL_MAX,
            fuel_consumption_rate: FUEL_CONSUMPTION_RATE,
            fuel_pickup_amount: FUEL_PICKUP_AMOUNT,
        }
    }
}

/// Turns held inputs into forces, fuel drain and thrust notifications.
///
/// The controller does not check the craft's lifecycle; [`crate::Lander`]
/// only calls it while the craft is in flight.
#[derive(Debug, Clone)]
pub struct FlightController {
    settings: FlightSettings,
    bus: Rc<EventBus>,
}

impl FlightController {
    /// Creates a controller publishing on `bus`.
    #[must_use]
    pub const fn new(settings: FlightSettings, bus: Rc<EventBus>) -> Self {
        Self { settings, bus }
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &FlightSettings {
        &self.settings
    }

    /// Runs one fixed step and returns the inputs that actually fired.
    ///
    /// Always announces [`LanderEvent::BeforeForce`]. With an empty tank
    /// nothing else happens. Otherwise fuel drains once for the step if any
    /// input is held, then each held input applies its force or torque and
    /// announces itself.
    pub fn step<B>(
        &self,
        body: &mut B,
        fuel: &mut FuelGauge,
        input: ControlInput,
        dt: f32,
    ) -> ControlInput
    where
        B: PhysicsBody + ?Sized,
    {
        self.bus.publish(&LanderEvent::BeforeForce);

        if fuel.is_empty() || !input.any() {
            return ControlInput::IDLE;
        }

        fuel.consume(self.settings.fuel_consumption_rate, dt);

        if input.up {
            let force = Vec2::Y * self.settings.thrust_force * dt;
            body.apply_force(force, ForceSpace::Local);
            self.bus.publish(&LanderEvent::UpForce);
        }
        if input.left {
            body.apply_torque(self.settings.turn_torque * dt);
            self.bus.publish(&LanderEvent::LeftForce);
        }
        if input.right {
            body.apply_torque(-self.settings.turn_torque * dt);
            self.bus.publish(&LanderEvent::RightForce);
        }
        trace!("fired {input:?}, fuel at {:.3}", fuel.amount());
        input
    }
}

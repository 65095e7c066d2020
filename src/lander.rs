//! The craft: body, fuel and a one-way lifecycle gate.
//!
//! A [`Lander`] starts in [`LanderState::Normal`]. Its first contact is
//! classified and moves it to [`LanderState::Landed`] or
//! [`LanderState::Crashed`]; both are terminal, so later steps, contacts and
//! pickups are ignored.

use std::rc::Rc;

use log::{debug, info};

use crate::contact::{Contact, ContactClassifier, LandingOutcome, LandingRules};
use crate::events::{EventBus, LanderEvent};
use crate::flight::{ControlInput, FlightController, FlightSettings};
use crate::fuel::FuelGauge;
use crate::physics::PhysicsBody;

/// Lifecycle of the craft within one level attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum LanderState {
    /// In flight and accepting input.
    #[default]
    Normal,
    /// Touched down successfully.
    Landed,
    /// Destroyed by a bad contact.
    Crashed,
}

impl LanderState {
    /// Whether no further transitions can happen.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Normal)
    }
}

/// Collectible the craft can fly through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pickup {
    /// Refills the tank.
    Fuel,
    /// Adds a score bonus.
    Coin,
}

/// Player craft wired to a physics body and the event bus.
#[derive(Debug)]
pub struct Lander<B> {
    body: B,
    fuel: FuelGauge,
    state: LanderState,
    controller: FlightController,
    classifier: ContactClassifier,
    fuel_pickup_amount: f32,
    bus: Rc<EventBus>,
}

impl<B: PhysicsBody> Lander<B> {
    /// Creates a craft in flight with a full tank.
    #[must_use]
    pub fn new(body: B, flight: FlightSettings, rules: LandingRules, bus: Rc<EventBus>) -> Self {
        Self {
            body,
            fuel: FuelGauge::full(flight.fuel_max),
            state: LanderState::Normal,
            controller: FlightController::new(flight, Rc::clone(&bus)),
            classifier: ContactClassifier::new(rules),
            fuel_pickup_amount: flight.fuel_pickup_amount,
            bus,
        }
    }

    /// Announces the craft's current state to observers.
    ///
    /// Called once a level is in place so timers and visuals can start.
    pub fn announce_state(&self) {
        self.bus.publish(&LanderEvent::StateChanged(self.state));
    }

    /// Runs input handling and integration for one fixed step.
    ///
    /// Returns the inputs that fired; nothing happens once the craft is
    /// terminal.
    pub fn fixed_step(&mut self, input: ControlInput, dt: f32) -> ControlInput {
        if self.state.is_terminal() {
            return ControlInput::IDLE;
        }
        let fired = self
            .controller
            .step(&mut self.body, &mut self.fuel, input, dt);
        self.body.integrate(dt);
        fired
    }

    /// Classifies the first contact and moves the craft to a terminal state.
    ///
    /// Returns `None` for any contact after the first.
    pub fn handle_contact(&mut self, contact: &Contact) -> Option<LandingOutcome> {
        if self.state.is_terminal() {
            debug!("ignoring contact while {:?}", self.state);
            return None;
        }

        let outcome = self.classifier.classify(contact);
        self.state = if outcome.is_success() {
            LanderState::Landed
        } else {
            LanderState::Crashed
        };
        info!("{:?}: {outcome:?}", self.state);

        self.bus.publish(&LanderEvent::Landed(outcome));
        self.bus.publish(&LanderEvent::StateChanged(self.state));
        Some(outcome)
    }

    /// Applies a pickup; returns `false` when the craft is terminal.
    pub fn handle_pickup(&mut self, pickup: Pickup) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        match pickup {
            Pickup::Fuel => {
                self.fuel.refuel(self.fuel_pickup_amount);
                debug!("refuelled to {:.2}", self.fuel.amount());
                self.bus.publish(&LanderEvent::FuelPickup);
            }
            Pickup::Coin => {
                self.bus.publish(&LanderEvent::CoinPickup);
            }
        }
        true
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> LanderState {
        self.state
    }

    /// Fuel reserve.
    #[must_use]
    pub const fn fuel(&self) -> &FuelGauge {
        &self.fuel
    }

    /// Underlying physics body.
    #[must_use]
    pub const fn body(&self) -> &B {
        &self.body
    }
}

//! Library crate providing the core lander game logic.
//! Re-exports the flight, contact, event and run components for the headless
//! binary and tests.
pub mod clock;
pub mod config;
pub mod constants;
pub mod contact;
pub mod events;
pub mod flight;
pub mod fuel;
pub mod lander;
pub mod level;
pub mod logging;
pub mod numeric;
pub mod observers;
pub mod physics;
pub mod pilot;
pub mod run;
pub mod simulation;
pub mod telemetry;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use clock::{FixedTimestep, TimeScale};
pub use config::{ConfigError, LanderConfig, ScoreSettings, WorldSettings};
pub use contact::{
    landing_score, Contact, ContactClassifier, ContactTarget, LandingKind, LandingOutcome,
    LandingPad, LandingRules, LandingScore,
};
pub use events::{EventBus, EventKind, LanderEvent, SubscriptionId};
pub use flight::{ControlInput, FlightController, FlightSettings};
pub use fuel::FuelGauge;
pub use lander::{Lander, LanderState, Pickup};
pub use level::{LevelCatalog, LevelDefinition, PadPlacement};
pub use logging::init as init_logging;
pub use observers::{AudioSettings, SoundCue, SoundCues, ThrusterEmitters};
pub use physics::{applied_acceleration, ForceSpace, KinematicBody, PhysicsBody};
pub use pilot::{DescentPilot, HeldInput, Pilot};
pub use run::{LevelTransition, RunCoordinator, RunState};
pub use simulation::Simulation;
pub use telemetry::Telemetry;
pub use vector_math::{alignment, up_axis};
pub use world::LevelWorld;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use lander::prelude::*;
    //! ```

    pub use crate::ControlInput;
    pub use crate::EventBus;
    pub use crate::LanderConfig;
    pub use crate::LanderEvent;
    pub use crate::LandingOutcome;
    pub use crate::PhysicsBody;
    pub use crate::Pilot;
    pub use crate::Simulation;
    pub use glam::Vec2;
}

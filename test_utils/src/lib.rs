//! Utility helpers for tests.
//!
//! Contact builders, an event recorder and a scripted physics body shared by
//! the integration suites.

pub mod contacts;
pub mod events;
pub mod physics;

pub use contacts::{craft_up_for_alignment, pad_contact, terrain_contact};
pub use events::EventRecorder;
pub use physics::RecordingBody;

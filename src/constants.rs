//! Game constants used across systems.
//!
//! These are the defaults behind [`crate::config::LanderConfig`]; a loaded
//! configuration may override most of them.

/// Force applied along the craft's up axis while thrust is held.
pub const THRUST_FORCE: f32 = 700.0;
/// Torque magnitude applied while a rotate input is held.
pub const TURN_TORQUE: f32 = 100.0;

/// Fuel capacity of a freshly spawned craft.
pub const FUEL_MAX: f32 = 10.0;
/// Fuel drained per second while any control input is held.
pub const FUEL_CONSUMPTION_RATE: f32 = 1.0;
/// Fuel restored by a single fuel cell pickup.
pub const FUEL_PICKUP_AMOUNT: f32 = 10.0;

/// Highest impact speed that still counts as a soft landing.
pub const SOFT_LANDING_THRESHOLD: f32 = 4.0;
/// Lowest acceptable dot product between world up and craft up.
pub const MIN_ALIGNMENT: f32 = 0.90;

/// Maximum score awarded for landing angle.
pub const MAX_ANGLE_SCORE: f64 = 100.0;
/// Penalty scale applied to the alignment deviation.
pub const ANGLE_SCORE_MULTIPLIER: f64 = 10.0;
/// Score awarded per unit of speed below the soft landing threshold.
pub const SPEED_SCORE_MULTIPLIER: f64 = 100.0;
/// Bonus added to the level score for each collected coin.
pub const COIN_BONUS: u32 = 500;

/// Duration of one fixed physics step in seconds.
pub const FIXED_DELTA_TIME: f32 = 0.02;
/// Upper bound on fixed steps run for a single frame.
pub const MAX_STEPS_PER_FRAME: u32 = 8;
/// Gravitational acceleration applied by the bundled integrator.
pub const GRAVITY_PULL: f32 = -2.5;
/// Mass of the craft used by the bundled integrator.
pub const DEFAULT_MASS: f32 = 1.0;
/// Rotational inertia of the craft used by the bundled integrator.
pub const DEFAULT_INERTIA: f32 = 1.0;
/// Per-second fraction of angular velocity lost to damping.
pub const ANGULAR_DAMPING: f32 = 0.05;
/// Distance from the craft's centre to its landing legs.
pub const LANDER_HALF_HEIGHT: f32 = 0.5;
/// Radius within which the craft collects a pickup.
pub const PICKUP_RADIUS: f32 = 1.0;

/// Number of discrete volume steps for sound and music.
pub const VOLUME_LEVELS: u8 = 10;
/// Sound effect volume on first launch.
pub const DEFAULT_SOUND_VOLUME: u8 = 6;
/// Music volume on first launch.
pub const DEFAULT_MUSIC_VOLUME: u8 = 4;

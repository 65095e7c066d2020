//! Game configuration loaded from JSON.
//!
//! Every section falls back to the defaults in [`crate::constants`], so a
//! configuration file only needs to name the values it changes.

use std::fs;
use std::path::{Path, PathBuf};

use glam::Vec2;
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::contact::LandingRules;
use crate::flight::FlightSettings;
use crate::level::{default_levels, LevelCatalog, LevelDefinition};
use crate::physics::KinematicBody;
use crate::{
    ANGULAR_DAMPING, COIN_BONUS, DEFAULT_INERTIA, DEFAULT_MASS, FIXED_DELTA_TIME, GRAVITY_PULL,
    LANDER_HALF_HEIGHT, MAX_STEPS_PER_FRAME, PICKUP_RADIUS,
};

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The document was not valid JSON for [`LanderConfig`].
    #[error("malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value was outside its accepted range.
    #[error("invalid {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// What was wrong with it.
        reason: String,
    },
}

/// Scoring values outside the landing formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScoreSettings {
    /// Points added for each coin.
    pub coin_bonus: u32,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            coin_bonus: COIN_BONUS,
        }
    }
}

/// Physical parameters of the bundled simulation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Gravitational acceleration.
    pub gravity: Vec2,
    /// Length of one fixed step in seconds.
    pub fixed_delta_time: f32,
    /// Cap on fixed steps per frame.
    pub max_steps_per_frame: u32,
    /// Craft mass.
    pub mass: f32,
    /// Craft rotational inertia.
    pub inertia: f32,
    /// Fraction of angular velocity lost per second.
    pub angular_damping: f32,
    /// Distance from the craft's centre to its landing legs.
    pub lander_half_height: f32,
    /// Reach within which pickups are collected.
    pub pickup_radius: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            gravity: Vec2::new(0.0, GRAVITY_PULL),
            fixed_delta_time: FIXED_DELTA_TIME,
            max_steps_per_frame: MAX_STEPS_PER_FRAME,
            mass: DEFAULT_MASS,
            inertia: DEFAULT_INERTIA,
            angular_damping: ANGULAR_DAMPING,
            lander_half_height: LANDER_HALF_HEIGHT,
            pickup_radius: PICKUP_RADIUS,
        }
    }
}

impl WorldSettings {
    /// Spawns a body at `start` using these parameters.
    #[must_use]
    pub fn spawn_body(&self, start: Vec2) -> KinematicBody {
        KinematicBody::at(start)
            .with_gravity(self.gravity)
            .with_mass(self.mass, self.inertia)
            .with_angular_damping(self.angular_damping)
    }
}

/// Complete game configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanderConfig {
    /// Thrust and fuel.
    pub flight: FlightSettings,
    /// Landing thresholds.
    pub landing: LandingRules,
    /// Bonus scoring.
    pub score: ScoreSettings,
    /// Physical parameters.
    pub world: WorldSettings,
    /// Levels in play order.
    pub levels: Vec<LevelDefinition>,
}

impl Default for LanderConfig {
    fn default() -> Self {
        Self {
            flight: FlightSettings::default(),
            landing: LandingRules::default(),
            score: ScoreSettings::default(),
            world: WorldSettings::default(),
            levels: default_levels(),
        }
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("expected a positive number, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(
            field,
            format!("expected a non-negative number, got {value}"),
        ))
    }
}

impl LanderConfig {
    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    ///
    /// # Examples
    ///
    /// ```
    /// use lander::config::LanderConfig;
    /// let config = LanderConfig::from_json_str(r#"{"score": {"coin_bonus": 250}}"#)?;
    /// assert_eq!(config.score.coin_bonus, 250);
    /// assert_eq!(config.levels.len(), 3);
    /// # Ok::<(), lander::config::ConfigError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file cannot be read, otherwise as
    /// [`LanderConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let json = fs::read_to_string(file).map_err(|source| ConfigError::Read {
            path: file.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!("loaded configuration from {}", file.display());
        Ok(config)
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_negative("flight.thrust_force", self.flight.thrust_force)?;
        require_non_negative("flight.turn_torque", self.flight.turn_torque)?;
        require_positive("flight.fuel_max", self.flight.fuel_max)?;
        require_non_negative(
            "flight.fuel_consumption_rate",
            self.flight.fuel_consumption_rate,
        )?;
        require_non_negative("flight.fuel_pickup_amount", self.flight.fuel_pickup_amount)?;
        require_non_negative("landing.soft_landing_speed", self.landing.soft_landing_speed)?;
        if !(-1.0..=1.0).contains(&self.landing.min_alignment) {
            return Err(invalid(
                "landing.min_alignment",
                format!("expected a value in [-1, 1], got {}", self.landing.min_alignment),
            ));
        }
        require_positive("world.fixed_delta_time", self.world.fixed_delta_time)?;
        require_positive("world.mass", self.world.mass)?;
        require_positive("world.inertia", self.world.inertia)?;
        require_non_negative("world.angular_damping", self.world.angular_damping)?;
        require_non_negative("world.lander_half_height", self.world.lander_half_height)?;
        require_non_negative("world.pickup_radius", self.world.pickup_radius)?;
        if !self.world.gravity.is_finite() {
            return Err(invalid("world.gravity", "expected finite components"));
        }
        if self.world.max_steps_per_frame == 0 {
            return Err(invalid("world.max_steps_per_frame", "expected at least one step"));
        }
        self.validate_levels()
    }

    fn validate_levels(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(invalid("levels", "at least one level is required"));
        }
        let mut numbers: Vec<u32> = self.levels.iter().map(|level| level.number).collect();
        numbers.sort_unstable();
        for (expected, number) in (1_u32..).zip(&numbers) {
            if *number != expected {
                return Err(invalid(
                    "levels",
                    format!("level numbers must run 1..={} without gaps", numbers.len()),
                ));
            }
        }
        for level in &self.levels {
            if !level.start.is_finite() || !level.ground_height.is_finite() {
                return Err(invalid(
                    "levels.start",
                    format!("level {} has a non-finite layout", level.number),
                ));
            }
            for pad in &level.pads {
                require_non_negative("levels.pads.multiplier", pad.multiplier)?;
                require_positive("levels.pads.width", pad.width)?;
            }
        }
        Ok(())
    }

    /// Level catalog built from the configured levels.
    #[must_use]
    pub fn catalog(&self) -> LevelCatalog {
        LevelCatalog::new(self.levels.clone())
    }
}

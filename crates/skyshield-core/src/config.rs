//! Runtime configuration for a simulation run.
//!
//! [`SimConfig`] mirrors the tunable constants in [`crate::constants`]. It can
//! be loaded from JSON; missing keys fall back to the compile-time defaults,
//! so a minimal file can override just the values you care about.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Initial time scale (1.0 = normal). Only the tick driver reads this.
    pub time_scale: f64,

    // ── Play area ────────────────────────────────────────────────────────
    pub width: f64,
    pub height: f64,

    // ── Spawn policy ─────────────────────────────────────────────────────
    pub starting_level: u32,
    pub spawn_probability: f64,
    pub enemy_base_speed: f64,
    pub enemy_speed_per_level: f64,

    // ── Interceptors ─────────────────────────────────────────────────────
    pub launch_speed: f64,
    pub missile_length: f64,

    // ── Rules ────────────────────────────────────────────────────────────
    /// End the game once every base and every city is destroyed.
    pub game_over_when_defenses_lost: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            starting_level: STARTING_LEVEL,
            spawn_probability: SPAWN_PROBABILITY,
            enemy_base_speed: ENEMY_BASE_SPEED,
            enemy_speed_per_level: ENEMY_SPEED_PER_LEVEL,
            launch_speed: LAUNCH_SPEED,
            missile_length: MISSILE_LENGTH,
            game_over_when_defenses_lost: true,
        }
    }
}

impl SimConfig {
    /// Parse a JSON document and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.width.is_finite() && self.width > 0.0)
            || !(self.height.is_finite() && self.height > 0.0)
        {
            return Err(ConfigError::Invalid(format!(
                "play area must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.spawn_probability) {
            return Err(ConfigError::Invalid(format!(
                "spawn_probability must be within 0..=1, got {}",
                self.spawn_probability
            )));
        }
        if self.starting_level == 0 {
            return Err(ConfigError::Invalid("starting_level must be at least 1".into()));
        }
        if !(self.launch_speed.is_finite() && self.launch_speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "launch_speed must be positive, got {}",
                self.launch_speed
            )));
        }
        if !(self.missile_length.is_finite() && self.missile_length > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "missile_length must be positive, got {}",
                self.missile_length
            )));
        }
        if !(self.enemy_base_speed.is_finite() && self.enemy_speed_per_level.is_finite()) {
            return Err(ConfigError::Invalid("enemy speeds must be finite".into()));
        }
        if self.enemy_speed_per_level < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "enemy_speed_per_level must not be negative, got {}",
                self.enemy_speed_per_level
            )));
        }
        // Missiles only leave by crossing the bottom edge.
        if self.enemy_speed(self.starting_level) <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "enemy speed at level {} must be positive, got {}",
                self.starting_level,
                self.enemy_speed(self.starting_level)
            )));
        }
        if !(self.time_scale.is_finite() && self.time_scale >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "time_scale must be non-negative, got {}",
                self.time_scale
            )));
        }
        Ok(())
    }

    /// Enemy descent speed at the given level.
    pub fn enemy_speed(&self, level: u32) -> f64 {
        self.enemy_base_speed + level as f64 * self.enemy_speed_per_level
    }

    /// Distance at which an interceptor detonates against an enemy missile.
    pub fn detonation_proximity(&self) -> f64 {
        self.missile_length * DETONATION_PROXIMITY_FACTOR
    }

    /// Cap of a detonation blast, also the chain-kill sweep radius.
    pub fn detonation_radius(&self) -> f64 {
        self.missile_length * DETONATION_RADIUS_FACTOR
    }
}

//! Simulation settings
//!
//! Every tunable lives here. Defaults come from [`crate::consts`]; a JSON file
//! can override any subset of fields.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors raised while loading or validating a [`SimConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Planets spawned when the engine starts
    pub initial_bodies: usize,
    /// Radius of the bounding shell
    pub distance_max: f32,
    /// Seconds a new body flashes before it may collide
    pub load_period: f64,
    /// Ticks between random heading changes
    pub heading_change_period: u32,
    /// Merge-collision threshold; random radii start at four times this
    pub min_collidable_radius: f32,
    /// Largest random planet radius
    pub spawn_radius_max: f32,
    /// Divisor applied to particle radius every tick (> 1)
    pub explosion_shrink_rate: f32,
    /// Particle distance per tick
    pub explosion_speed: f32,
    /// Particles at or below this radius are removed
    pub explosion_min_radius: f32,
    /// Ring extent beyond the planet radius for ringed appearances
    pub ring_size: f32,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            initial_bodies: INITIAL_BODIES,
            distance_max: DISTANCE_MAX,
            load_period: LOAD_PERIOD,
            heading_change_period: HEADING_CHANGE_PERIOD,
            min_collidable_radius: MIN_COLLIDABLE_RADIUS,
            spawn_radius_max: SPAWN_RADIUS_MAX,
            explosion_shrink_rate: EXPLOSION_SHRINK_RATE,
            explosion_speed: EXPLOSION_SPEED,
            explosion_min_radius: EXPLOSION_MIN_RADIUS,
            ring_size: RING_SIZE,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Smallest random planet radius
    #[inline]
    pub fn spawn_radius_min(&self) -> f32 {
        self.min_collidable_radius * 4.0
    }

    /// Parse a config from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Check that the values describe a workable simulation
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
            ConfigError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        let finite = [
            ("distance_max", self.distance_max),
            ("min_collidable_radius", self.min_collidable_radius),
            ("spawn_radius_max", self.spawn_radius_max),
            ("explosion_shrink_rate", self.explosion_shrink_rate),
            ("explosion_speed", self.explosion_speed),
            ("explosion_min_radius", self.explosion_min_radius),
            ("ring_size", self.ring_size),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(invalid(field, "must be finite"));
            }
        }
        if !self.load_period.is_finite() {
            return Err(invalid("load_period", "must be finite"));
        }

        if !(self.distance_max > SPAWN_DISTANCE_MIN) {
            return Err(invalid(
                "distance_max",
                format!("must exceed the minimum spawn distance {SPAWN_DISTANCE_MIN}"),
            ));
        }
        if !(self.load_period >= 0.0) {
            return Err(invalid("load_period", "must not be negative"));
        }
        if self.heading_change_period == 0 {
            return Err(invalid("heading_change_period", "must be at least 1"));
        }
        if !(self.min_collidable_radius > 0.0) {
            return Err(invalid("min_collidable_radius", "must be positive"));
        }
        if !(self.spawn_radius_max > self.spawn_radius_min()) {
            return Err(invalid(
                "spawn_radius_max",
                format!("must exceed {} (4 x min_collidable_radius)", self.spawn_radius_min()),
            ));
        }
        if !(self.explosion_shrink_rate > 1.0) {
            return Err(invalid("explosion_shrink_rate", "must be greater than 1"));
        }
        if !(self.explosion_min_radius > 0.0) {
            return Err(invalid("explosion_min_radius", "must be positive"));
        }
        if self.explosion_min_radius >= self.min_collidable_radius {
            return Err(invalid(
                "explosion_min_radius",
                "must be smaller than min_collidable_radius",
            ));
        }
        Ok(())
    }
}

//! Combat configuration (fixed at startup).
//!
//! Один `CombatConfig` resource на матч. Engine получает копию при создании,
//! поэтому изменение resource после спавна не влияет на живых игроков.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration load/validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse combat config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid combat config: {field} = {value} ({reason})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Horizontal speed thresholds (speed units per second).
///
/// - `speed <= idle` → collapse locomotion to Idle
/// - `idle < speed <= walk` → Moving
/// - `walk < speed <= sprint` → Running
/// - `speed > sprint` → Sprinting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MovementThresholds {
    pub idle: f32,
    pub walk: f32,
    pub sprint: f32,
}

impl Default for MovementThresholds {
    fn default() -> Self {
        Self {
            idle: 1.0,
            walk: 16.0,
            sprint: 22.0,
        }
    }
}

/// Combat tuning constants.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct CombatConfig {
    /// Inactivity delay before the combo rewinds to step 1 (seconds)
    pub combo_reset_delay: f32,

    /// Longest combo sequence; steps beyond it are dropped at load
    pub max_combo_length: u32,

    /// Debounce window after each attack (seconds)
    pub attack_cooldown: f32,

    /// Global multiplier applied to every local hit
    pub damage_multiplier: f32,

    /// Probability of a critical hit per roll, in [0, 1]
    pub critical_chance: f32,

    /// Damage multiplier for critical hits
    pub critical_multiplier: f32,

    /// Scales the damage of steps past the third and of finishers
    pub combo_power: f32,

    /// Combo hit count from which every hit is critical
    pub guaranteed_crit_hits: u32,

    /// Playback rate for attack animations
    pub animation_speed: f32,

    /// Interval between movement-state polls (seconds)
    pub movement_poll_interval: f32,

    pub movement: MovementThresholds,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            combo_reset_delay: 2.5,
            max_combo_length: 4,
            attack_cooldown: 0.35,
            damage_multiplier: 1.0,
            critical_chance: 0.15,
            critical_multiplier: 1.5,
            combo_power: 1.0,
            guaranteed_crit_hits: 10,
            animation_speed: 1.0,
            movement_poll_interval: 0.1,
            movement: MovementThresholds::default(),
        }
    }
}

impl CombatConfig {
    /// Parse TOML (missing keys take defaults) and validate.
    ///
    /// ```toml
    /// attack_cooldown = 0.3
    /// critical_chance = 0.2
    ///
    /// [movement]
    /// sprint = 24.0
    /// ```
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: CombatConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    field,
                    value: value as f64,
                    reason: "must be a finite non-negative number",
                })
            }
        }

        non_negative("combo_reset_delay", self.combo_reset_delay)?;
        non_negative("attack_cooldown", self.attack_cooldown)?;
        non_negative("damage_multiplier", self.damage_multiplier)?;
        non_negative("critical_multiplier", self.critical_multiplier)?;
        non_negative("combo_power", self.combo_power)?;
        non_negative("movement_poll_interval", self.movement_poll_interval)?;

        if self.max_combo_length == 0 {
            return Err(ConfigError::OutOfRange {
                field: "max_combo_length",
                value: 0.0,
                reason: "combo needs at least one step",
            });
        }

        if !(0.0..=1.0).contains(&self.critical_chance) {
            return Err(ConfigError::OutOfRange {
                field: "critical_chance",
                value: self.critical_chance as f64,
                reason: "must be within [0, 1]",
            });
        }

        if !(self.animation_speed.is_finite() && self.animation_speed > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "animation_speed",
                value: self.animation_speed as f64,
                reason: "must be positive",
            });
        }

        let thresholds = self.movement;
        if !(thresholds.idle <= thresholds.walk && thresholds.walk <= thresholds.sprint) {
            return Err(ConfigError::OutOfRange {
                field: "movement.walk",
                value: thresholds.walk as f64,
                reason: "thresholds must satisfy idle <= walk <= sprint",
            });
        }

        Ok(())
    }
}

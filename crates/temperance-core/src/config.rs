//! Configuration System
//!
//! Loads run constants from a TOML file. Every field has a default, so a
//! file only needs to name what it changes.

use bevy_ecs::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{ConfigError, SimError};

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "temperance.toml";

/// Largest grid side; cells are addressed with `i32` coordinates
pub const MAX_GRID_SIZE: u32 = i32::MAX as u32;

/// Top-level configuration structure
#[derive(Resource, Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub world: WorldConfig,
    pub agents: AgentConfig,
    pub food: FoodConfig,
}

/// Grid parameters
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Side length of the square grid
    pub grid_size: u32,
}

/// Agent population and physiology
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub count: usize,
    /// How many agents the info panel shows
    pub shown_info: usize,
    /// Vision radius; agents see a box of side `2 * vision + 1`
    pub vision: u32,
    pub starting_health: f64,
    /// Health lost every tick
    pub metabolism: f64,
    /// Social pressure gained per witnessed meal
    pub social_pressure_step: f64,
}

/// Food patches
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FoodConfig {
    pub count: usize,
    /// Ticks a consumed patch stays empty
    pub regrowth_ticks: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self { grid_size: 5 }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            count: 3,
            shown_info: 1,
            vision: 2,
            starting_health: 10.0,
            metabolism: 0.5,
            social_pressure_step: 0.2,
        }
    }
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            count: 5,
            regrowth_ticks: 3,
        }
    }
}

impl SimConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default path, or use defaults if not found
    pub fn load_or_default() -> Self {
        Self::load(DEFAULT_CONFIG_PATH).unwrap_or_else(|e| {
            tracing::warn!("Could not load {}: {}. Using defaults.", DEFAULT_CONFIG_PATH, e);
            Self::default()
        })
    }

    /// Reject any constant that is not strictly positive, and a grid too
    /// wide for signed cell coordinates.
    ///
    /// Whether the counts fit on the grid is left to placement, which
    /// reports `PlacementExhausted`.
    pub fn validate(&self) -> Result<(), SimError> {
        positive_int("world.grid_size", self.world.grid_size as u64)?;
        if self.world.grid_size > MAX_GRID_SIZE {
            return Err(SimError::InvalidConfiguration {
                field: "world.grid_size",
                value: self.world.grid_size.to_string(),
                reason: "must fit a signed 32-bit coordinate",
            });
        }
        positive_int("agents.count", self.agents.count as u64)?;
        positive_int("agents.shown_info", self.agents.shown_info as u64)?;
        positive_int("agents.vision", self.agents.vision as u64)?;
        positive_real("agents.starting_health", self.agents.starting_health)?;
        positive_real("agents.metabolism", self.agents.metabolism)?;
        positive_real("agents.social_pressure_step", self.agents.social_pressure_step)?;
        positive_int("food.count", self.food.count as u64)?;
        positive_int("food.regrowth_ticks", self.food.regrowth_ticks as u64)?;
        Ok(())
    }
}

fn positive_int(field: &'static str, value: u64) -> Result<(), SimError> {
    if value == 0 {
        return Err(SimError::InvalidConfiguration {
            field,
            value: value.to_string(),
            reason: "must be positive",
        });
    }
    Ok(())
}

fn positive_real(field: &'static str, value: f64) -> Result<(), SimError> {
    // NaN fails this comparison too
    if !(value > 0.0) {
        return Err(SimError::InvalidConfiguration {
            field,
            value: value.to_string(),
            reason: "must be positive",
        });
    }
    Ok(())
}

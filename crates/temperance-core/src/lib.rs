//! Temperance Simulation Engine Library
//!
//! Agents forage on a small grid, scoring food with a PECS appraisal
//! (physical, emotional, cognitive, social) and learning rules about how much
//! it is wise to eat, from their own stomachs and from being watched.

use bevy_ecs::prelude::*;
use rand::rngs::SmallRng;

pub mod components;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod output;
pub mod setup;
pub mod systems;

pub use components::*;
pub use config::SimConfig;
pub use engine::{Simulation, TickReport};
pub use error::{ConfigError, SimError};

/// Seeded random number generator resource
#[derive(Resource)]
pub struct SimRng(pub SmallRng);

//! Simulation Components
//!
//! Agents, food patches, grid coordinates and the registries that own them.

pub mod agent;
pub mod food;
pub mod world;

pub use agent::*;
pub use food::*;
pub use world::*;

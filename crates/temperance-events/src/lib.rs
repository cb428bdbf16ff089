//! Shared event and snapshot types for the temperance simulation.
//!
//! This crate contains pure data structures with no simulation logic.
//! Renderers and log consumers depend on it without pulling in the engine.

pub mod event;
pub mod snapshot;

// Re-export event types
pub use event::{Cell, EventKind, EventType, SimEvent};

// Re-export snapshot types
pub use snapshot::{AgentSnapshot, FoodSnapshot, SeenFoodSnapshot, WorldSnapshot};

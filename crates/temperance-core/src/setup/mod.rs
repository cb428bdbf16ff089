//! World Setup
//!
//! Initial placement of agents and food.

pub mod placement;

pub use placement::*;

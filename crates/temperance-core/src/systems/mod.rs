//! ECS Systems
//!
//! Per-tick simulation steps: regrowth, the agent pipeline (movement,
//! perception, decision, consumption, metabolism) and reaping the dead.

pub mod consumption;
pub mod decision;
pub mod metabolism;
pub mod movement;
pub mod perception;
pub mod pipeline;
pub mod regrowth;

pub use consumption::{consume, release_pursuits, Meal, SocialRules};
pub use decision::{decide, first_attractive};
pub use metabolism::{metabolize, reap_dead, reap_dead_agents};
pub use movement::{apply_move, candidate_cell, Intent, MoveOutcome};
pub use perception::look_around;
pub use pipeline::{run_agent_pipeline, take_turn, verify_references, IntegrityLog, TurnRules};
pub use regrowth::{regrow, regrow_food};

/// Round to one decimal place, half away from zero.
pub fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

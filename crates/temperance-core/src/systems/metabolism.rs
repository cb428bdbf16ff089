//! Metabolism System
//!
//! Health drains every tick; agents that run out are removed once the
//! whole agent pass is over.

use bevy_ecs::prelude::*;

use crate::components::{Agent, AgentId, AgentRegistry};

use super::round_tenth;

/// Burn one tick of health. Returns false when the agent starved.
pub fn metabolize(agent: &mut Agent, rate: f64) -> bool {
    agent.health = round_tenth(agent.health - rate);
    agent.is_alive()
}

/// Remove every agent whose health is at or below zero.
pub fn reap_dead(agents: &mut AgentRegistry) -> Vec<AgentId> {
    let dead: Vec<AgentId> = agents
        .iter()
        .filter(|a| !a.is_alive())
        .map(|a| a.id)
        .collect();
    for id in &dead {
        agents.remove(*id);
    }
    dead
}

/// System: drop the agents that died during this tick's pass
pub fn reap_dead_agents(mut agents: ResMut<AgentRegistry>) {
    let dead = reap_dead(&mut agents);
    if !dead.is_empty() {
        tracing::debug!(count = dead.len(), remaining = agents.len(), "removed dead agents");
    }
}

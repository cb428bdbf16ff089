//! Snapshot Generation
//!
//! Copies the registries into the serializable `WorldSnapshot` renderers read.

use temperance_events::{AgentSnapshot, FoodSnapshot, SeenFoodSnapshot, WorldSnapshot};

use crate::components::{Agent, AgentRegistry, Food, FoodRegistry};

/// Generate a complete world snapshot
pub fn build_snapshot(
    tick: u64,
    grid_size: u32,
    agents: &AgentRegistry,
    food: &FoodRegistry,
) -> WorldSnapshot {
    let mut snapshot = WorldSnapshot::new(tick, grid_size);
    snapshot.agents = agents
        .iter()
        .filter(|a| a.is_alive())
        .map(|a| agent_snapshot(a, food))
        .collect();
    snapshot.food = food.iter().map(food_snapshot).collect();
    snapshot
}

fn agent_snapshot(agent: &Agent, food: &FoodRegistry) -> AgentSnapshot {
    let seeing = agent
        .seeing
        .iter()
        .zip(&agent.seeing_scores)
        .filter_map(|(id, score)| {
            let patch = food.get(*id)?;
            Some(SeenFoodSnapshot {
                food_id: id.0,
                position: patch.position.into(),
                amount: patch.amount.units(),
                physical: score.physical,
                emotional: score.emotional,
                cognitive: score.cognitive,
                social: score.social,
                total: score.total,
            })
        })
        .collect();

    AgentSnapshot {
        agent_id: agent.id.0,
        position: agent.position.into(),
        health: agent.health,
        pursuing: agent.pursuing.map(|f| f.0),
        consuming: agent.consuming.map(|f| f.0),
        punished: agent.punished,
        rule_weights: agent.rules.weights(),
        social_pressure: agent.social_pressure,
        times_sick_3: agent.times_sick_3,
        times_punished_2: agent.times_punished_2,
        times_punished_3: agent.times_punished_3,
        seeing,
    }
}

fn food_snapshot(food: &Food) -> FoodSnapshot {
    FoodSnapshot {
        food_id: food.id.0,
        position: food.position.into(),
        amount: food.amount.units(),
        consumed: food.consumed,
        regrowth_timer: food.regrowth_timer,
    }
}

//! Consumption System
//!
//! Eating the pursued food and learning from it: health, sickness, rule
//! weights, and punishment when someone was watching.

use crate::components::{Agent, AgentId, AgentRegistry, FoodAmount, FoodId, FoodRegistry, Rule};
use crate::error::SimError;

use super::round_tenth;

/// Everything that happened when an agent ate
#[derive(Debug, Clone, PartialEq)]
pub struct Meal {
    pub food: FoodId,
    pub amount: FoodAmount,
    /// Another living agent stood inside the eater's vision box
    pub witnessed: bool,
    pub punished: bool,
    /// Other agents whose pursuit of this food was cancelled
    pub invalidated: Vec<AgentId>,
}

/// Social knobs applied to a meal
#[derive(Debug, Clone, Copy)]
pub struct SocialRules {
    pub vision: u32,
    pub pressure_step: f64,
}

/// Eat the pursued food if the agent is standing on it.
///
/// `agent` has been taken out of `others` for its turn, so `others` holds
/// every other agent. Returns `Ok(None)` when there is nothing to eat yet.
pub fn consume(
    agent: &mut Agent,
    others: &mut AgentRegistry,
    food: &mut FoodRegistry,
    social: SocialRules,
) -> Result<Option<Meal>, SimError> {
    let Some(target) = agent.pursuing else {
        return Ok(None);
    };
    let patch = food
        .get_mut(target)
        .filter(|f| f.is_available())
        .ok_or(SimError::StaleReference {
            agent: agent.id,
            food: target,
            role: "pursuing",
        })?;
    if patch.position != agent.position {
        return Ok(None);
    }

    patch.consumed = true;
    let amount = patch.amount;
    agent.consuming = Some(target);
    agent.pursuing = None;

    agent.health += amount.health_effect();
    if amount == FoodAmount::Three {
        agent.times_sick_3 += 1;
    }
    agent.rules.reinforce(Rule::from_experience(amount));

    let witnessed = others.has_witness(agent.position, agent.id, social.vision);
    if witnessed {
        agent.social_pressure = round_tenth(agent.social_pressure + social.pressure_step);
        if let Some(rule) = Rule::from_punishment(amount) {
            match amount {
                FoodAmount::Two => agent.times_punished_2 += 1,
                FoodAmount::Three => agent.times_punished_3 += 1,
                FoodAmount::One => {}
            }
            agent.punished = true;
            agent.rules.reinforce(rule);
        }
    }

    let invalidated = release_pursuits(others, target);

    Ok(Some(Meal {
        food: target,
        amount,
        witnessed,
        punished: agent.punished,
        invalidated,
    }))
}

/// Clear every pursuit of `food`, returning who was chasing it.
pub fn release_pursuits(agents: &mut AgentRegistry, food: FoodId) -> Vec<AgentId> {
    let mut released = Vec::new();
    for agent in agents.iter_mut() {
        if agent.pursuing == Some(food) {
            agent.pursuing = None;
            released.push(agent.id);
        }
    }
    released
}

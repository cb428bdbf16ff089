//! PECS Decision Procedure
//!
//! Scores a food patch for an agent along four components:
//! - Physical: hunger, from current health
//! - Emotional: appetite for the amount, dulled by past sickness
//! - Cognitive: learned rules about the amount
//! - Social: approval or punishment from others, scaled by social pressure
//!
//! The agent pursues the first patch in its (shuffled) view whose total is
//! strictly positive.

use crate::components::{Agent, Appraisal, Food, FoodAmount, Rule, RuleBook};

use super::round_tenth;

/// Health at or above which the agent is sated
pub const SATED_HEALTH: f64 = 10.0;

/// Hunger score from health. Brackets are `[10, ∞) → 0`, `(6, 10) → 1`,
/// `(3, 6] → 2` and `(-∞, 3] → 3`.
pub fn physical_score(health: f64) -> i32 {
    if health >= SATED_HEALTH {
        0
    } else if health > 6.0 {
        1
    } else if health > 3.0 {
        2
    } else {
        3
    }
}

/// Bigger patches look better, except that each bout of sickness from
/// three units makes three units look worse. Not clamped at zero.
pub fn emotional_score(amount: FoodAmount, times_sick_3: u32) -> i32 {
    match amount {
        FoodAmount::One => 1,
        FoodAmount::Two => 2,
        FoodAmount::Three => 3 - times_sick_3 as i32,
    }
}

pub fn cognitive_score(amount: FoodAmount, rules: &RuleBook) -> i32 {
    match amount {
        FoodAmount::One => rules.learned_weight(Rule::OneIsGoodForMe),
        FoodAmount::Two => {
            rules.learned_weight(Rule::TwoIsVeryGoodForMe)
                - rules.learned_weight(Rule::TwoIsBadForCommunity)
        }
        FoodAmount::Three => {
            -rules.learned_weight(Rule::ThreeIsBadForMe)
                - rules.learned_weight(Rule::ThreeIsBadForCommunity)
        }
    }
}

/// Mild approval for one unit, past punishments for two or three, all
/// scaled by how much social pressure the agent has absorbed.
pub fn social_score(amount: FoodAmount, agent: &Agent) -> f64 {
    let base = match amount {
        FoodAmount::One => 1.0,
        FoodAmount::Two => -(agent.times_punished_2 as f64),
        FoodAmount::Three => -(agent.times_punished_3 as f64),
    };
    round_tenth(base * agent.social_pressure)
}

/// Score one food patch for one agent. Pure: reads both, changes neither.
pub fn decide(agent: &Agent, food: &Food) -> Appraisal {
    let physical = physical_score(agent.health);
    let emotional = emotional_score(food.amount, agent.times_sick_3);
    let cognitive = cognitive_score(food.amount, &agent.rules);
    let social = social_score(food.amount, agent);
    let total = round_tenth((physical + emotional + cognitive) as f64 + social);

    Appraisal {
        physical,
        emotional,
        cognitive,
        social,
        total,
    }
}

/// Index into `appraisals` of the first attractive option
pub fn first_attractive(appraisals: &[Appraisal]) -> Option<usize> {
    appraisals.iter().position(Appraisal::is_attractive)
}

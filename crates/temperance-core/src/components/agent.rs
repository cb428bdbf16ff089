//! Agent Components
//!
//! Agents: position, health, learned rules, social counters and the
//! per-tick perception/pursuit state.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::food::{FoodAmount, FoodId};
use super::world::GridPos;

/// Unique identifier for an agent. Ids are handed out in creation order,
/// which is also the order agents act in each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgentId(pub u32);

impl std::fmt::Display for AgentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A{}", self.0)
    }
}

/// The five propositions an agent can come to believe about eating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    OneIsGoodForMe,
    TwoIsVeryGoodForMe,
    TwoIsBadForCommunity,
    ThreeIsBadForMe,
    ThreeIsBadForCommunity,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::OneIsGoodForMe,
        Rule::TwoIsVeryGoodForMe,
        Rule::TwoIsBadForCommunity,
        Rule::ThreeIsBadForMe,
        Rule::ThreeIsBadForCommunity,
    ];

    pub fn index(&self) -> usize {
        match self {
            Rule::OneIsGoodForMe => 0,
            Rule::TwoIsVeryGoodForMe => 1,
            Rule::TwoIsBadForCommunity => 2,
            Rule::ThreeIsBadForMe => 3,
            Rule::ThreeIsBadForCommunity => 4,
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            Rule::OneIsGoodForMe => "Consuming 1 food is good for me.",
            Rule::TwoIsVeryGoodForMe => "Consuming 2 food is very good for me.",
            Rule::TwoIsBadForCommunity => "Consuming 2 food is bad for the community.",
            Rule::ThreeIsBadForMe => "Consuming 3 food is bad for me.",
            Rule::ThreeIsBadForCommunity => "Consuming 3 food is bad for the community.",
        }
    }

    /// The rule learned from eating this amount yourself
    pub fn from_experience(amount: FoodAmount) -> Rule {
        match amount {
            FoodAmount::One => Rule::OneIsGoodForMe,
            FoodAmount::Two => Rule::TwoIsVeryGoodForMe,
            FoodAmount::Three => Rule::ThreeIsBadForMe,
        }
    }

    /// The rule learned from being punished for eating this amount, if any
    pub fn from_punishment(amount: FoodAmount) -> Option<Rule> {
        match amount {
            FoodAmount::One => None,
            FoodAmount::Two => Some(Rule::TwoIsBadForCommunity),
            FoodAmount::Three => Some(Rule::ThreeIsBadForCommunity),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleKnowledge {
    pub learned: bool,
    pub weight: u32,
}

/// What an agent has learned so far, one entry per rule
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    entries: [RuleKnowledge; 5],
}

impl RuleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn knowledge(&self, rule: Rule) -> RuleKnowledge {
        self.entries[rule.index()]
    }

    /// Mark the rule as known and reinforce it by one.
    pub fn reinforce(&mut self, rule: Rule) {
        let entry = &mut self.entries[rule.index()];
        entry.learned = true;
        entry.weight += 1;
    }

    /// Weight the rule contributes to a decision; unlearned rules contribute nothing.
    pub fn learned_weight(&self, rule: Rule) -> i32 {
        let entry = self.knowledge(rule);
        if entry.learned {
            entry.weight as i32
        } else {
            0
        }
    }

    pub fn weights(&self) -> [u32; 5] {
        self.entries.map(|e| e.weight)
    }
}

/// PECS scores an agent gave one food patch
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Appraisal {
    pub physical: i32,
    pub emotional: i32,
    pub cognitive: i32,
    pub social: f64,
    pub total: f64,
}

impl Appraisal {
    pub fn is_attractive(&self) -> bool {
        self.total > 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: GridPos,
    pub health: f64,
    pub rules: RuleBook,
    /// Times eating 3 units made the agent sick
    pub times_sick_3: u32,
    /// Times others punished the agent for eating 2 units
    pub times_punished_2: u32,
    /// Times others punished the agent for eating 3 units
    pub times_punished_3: u32,
    /// Grows by a fixed step every time the agent eats in view of others
    pub social_pressure: f64,

    /// Uneaten food in view this tick, in shuffled order
    pub seeing: Vec<FoodId>,
    /// Scores parallel to `seeing`
    pub seeing_scores: Vec<Appraisal>,
    pub pursuing: Option<FoodId>,
    /// Food eaten last tick; cleared when the agent next picks a target
    pub consuming: Option<FoodId>,
    pub punished: bool,
}

impl Agent {
    pub fn new(id: AgentId, position: GridPos, health: f64) -> Self {
        Self {
            id,
            position,
            health,
            rules: RuleBook::new(),
            times_sick_3: 0,
            times_punished_2: 0,
            times_punished_3: 0,
            social_pressure: 0.0,
            seeing: Vec::new(),
            seeing_scores: Vec::new(),
            pursuing: None,
            consuming: None,
            punished: false,
        }
    }

    pub fn with_pursuit(mut self, food: FoodId) -> Self {
        self.pursuing = Some(food);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }
}

/// Every agent in the world, keyed and iterated by id
#[derive(Resource, Debug, Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentId, Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent
    pub fn register(&mut self, agent: Agent) {
        self.agents.insert(agent.id, agent);
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    pub fn remove(&mut self, id: AgentId) -> Option<Agent> {
        self.agents.remove(&id)
    }

    /// All agents in id order
    pub fn iter(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Agent> {
        self.agents.values_mut()
    }

    /// Ids in acting order, copied so the registry can be mutated while walking them
    pub fn ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    /// The living agent standing on a cell, if any
    pub fn occupant_at(&self, position: GridPos) -> Option<AgentId> {
        self.agents
            .values()
            .find(|a| a.is_alive() && a.position == position)
            .map(|a| a.id)
    }

    /// Whether any living agent other than `exclude` stands inside the
    /// vision box around `position`
    pub fn has_witness(&self, position: GridPos, exclude: AgentId, radius: u32) -> bool {
        self.agents
            .values()
            .any(|other| other.id != exclude && other.is_alive() && position.within(other.position, radius))
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

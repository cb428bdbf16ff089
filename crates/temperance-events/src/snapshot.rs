//! Snapshot Types
//!
//! Read-only copies of the world handed to renderers after each tick.
//!
//! Snapshots carry everything the agent info panel needs: positions, health,
//! current pursuit, learned rule weights, social counters and the PECS
//! scores behind the last decision.

use serde::{Deserialize, Serialize};

use crate::event::Cell;

/// A food patch the agent saw this tick, with the scores it gave it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeenFoodSnapshot {
    pub food_id: u32,
    pub position: Cell,
    pub amount: u8,
    pub physical: i32,
    pub emotional: i32,
    pub cognitive: i32,
    pub social: f64,
    pub total: f64,
}

/// Full agent snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub agent_id: u32,
    pub position: Cell,
    pub health: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pursuing: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consuming: Option<u32>,
    #[serde(default)]
    pub punished: bool,
    /// Learned weight of each of the five rules, in rule order.
    pub rule_weights: [u32; 5],
    pub social_pressure: f64,
    pub times_sick_3: u32,
    pub times_punished_2: u32,
    pub times_punished_3: u32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub seeing: Vec<SeenFoodSnapshot>,
}

/// Food patch snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodSnapshot {
    pub food_id: u32,
    pub position: Cell,
    pub amount: u8,
    pub consumed: bool,
    pub regrowth_timer: u32,
}

/// Complete world snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub grid_size: u32,
    pub agents: Vec<AgentSnapshot>,
    pub food: Vec<FoodSnapshot>,
}

impl WorldSnapshot {
    pub fn new(tick: u64, grid_size: u32) -> Self {
        Self {
            tick,
            grid_size,
            agents: Vec::new(),
            food: Vec::new(),
        }
    }

    /// Finds an agent by ID.
    pub fn find_agent(&self, agent_id: u32) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.agent_id == agent_id)
    }

    /// Finds a food patch by ID.
    pub fn find_food(&self, food_id: u32) -> Option<&FoodSnapshot> {
        self.food.iter().find(|f| f.food_id == food_id)
    }

    /// Returns the agent standing on a cell.
    pub fn agent_at(&self, cell: Cell) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.position == cell)
    }

    /// Returns the uneaten food on a cell.
    pub fn available_food_at(&self, cell: Cell) -> Option<&FoodSnapshot> {
        self.food.iter().find(|f| f.position == cell && !f.consumed)
    }

    pub fn living_agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Serializes the snapshot to pretty JSON.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_agent(agent_id: u32, x: i32, y: i32) -> AgentSnapshot {
        AgentSnapshot {
            agent_id,
            position: Cell::new(x, y),
            health: 10.0,
            pursuing: None,
            consuming: None,
            punished: false,
            rule_weights: [0; 5],
            social_pressure: 0.0,
            times_sick_3: 0,
            times_punished_2: 0,
            times_punished_3: 0,
            seeing: Vec::new(),
        }
    }

    fn sample_food(food_id: u32, x: i32, y: i32, consumed: bool) -> FoodSnapshot {
        FoodSnapshot {
            food_id,
            position: Cell::new(x, y),
            amount: 2,
            consumed,
            regrowth_timer: 3,
        }
    }

    #[test]
    fn test_world_snapshot_lookups() {
        let mut snapshot = WorldSnapshot::new(4, 5);
        snapshot.agents.push(sample_agent(0, 1, 1));
        snapshot.agents.push(sample_agent(1, 3, 2));
        snapshot.food.push(sample_food(0, 1, 1, false));
        snapshot.food.push(sample_food(1, 4, 4, true));

        assert_eq!(snapshot.living_agent_count(), 2);
        assert_eq!(snapshot.find_agent(1).map(|a| a.position), Some(Cell::new(3, 2)));
        assert!(snapshot.find_agent(9).is_none());
        assert_eq!(snapshot.agent_at(Cell::new(1, 1)).map(|a| a.agent_id), Some(0));
        assert!(snapshot.available_food_at(Cell::new(1, 1)).is_some());
        assert!(snapshot.available_food_at(Cell::new(4, 4)).is_none());
        assert_eq!(snapshot.find_food(1).map(|f| f.consumed), Some(true));
    }

    #[test]
    fn test_world_snapshot_serialization() {
        let mut snapshot = WorldSnapshot::new(12, 5);
        let mut agent = sample_agent(0, 2, 2);
        agent.pursuing = Some(1);
        agent.seeing.push(SeenFoodSnapshot {
            food_id: 1,
            position: Cell::new(3, 3),
            amount: 2,
            physical: 1,
            emotional: 2,
            cognitive: 0,
            social: 0.0,
            total: 3.0,
        });
        snapshot.agents.push(agent);
        snapshot.food.push(sample_food(1, 3, 3, false));

        let json = snapshot.to_json_pretty().unwrap();
        assert!(json.contains("\"pursuing\": 1"));
        assert!(!json.contains("consuming"));

        let parsed = WorldSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, snapshot);
    }
}

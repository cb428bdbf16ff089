//! Invariant sweeps
//!
//! Random seeds and world shapes, checking after every tick that the world
//! stays consistent.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet};

use temperance_core::systems::{round_tenth, verify_references};
use temperance_core::{AgentId, FoodId, SimConfig, Simulation};
use temperance_events::EventKind;

const TICKS: u64 = 40;

fn config(grid_size: u32, agents: usize, food: usize, vision: u32, health: f64) -> SimConfig {
    let mut config = SimConfig::default();
    config.world.grid_size = grid_size;
    config.agents.count = agents;
    config.agents.vision = vision;
    config.agents.starting_health = health;
    config.food.count = food;
    config
}

fn world_config() -> impl Strategy<Value = SimConfig> {
    (3u32..=7, 1usize..=8, 1usize..=9, 1u32..=3, 3u32..=10).prop_map(
        |(grid_size, agents, food, vision, health)| {
            config(grid_size, agents, food, vision, health as f64)
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_no_two_agents_share_a_cell(seed in any::<u64>(), config in world_config()) {
        let grid_size = config.world.grid_size;
        let mut sim = Simulation::new(config, seed).unwrap();
        for _ in 0..TICKS {
            sim.step().unwrap();
            let mut cells = HashSet::new();
            for agent in sim.agents().iter() {
                prop_assert!(agent.position.in_bounds(grid_size));
                prop_assert!(cells.insert(agent.position), "two agents on {}", agent.position);
            }
        }
    }

    #[test]
    fn proptest_references_stay_valid(seed in any::<u64>(), config in world_config()) {
        let mut sim = Simulation::new(config, seed).unwrap();
        for _ in 0..TICKS {
            prop_assert!(sim.step().is_ok());
            prop_assert!(verify_references(sim.agents(), sim.food()).is_ok());
            for agent in sim.agents().iter() {
                prop_assert!(agent.is_alive());
                prop_assert!(agent.pursuing.is_none() || agent.consuming.is_none());
                prop_assert_eq!(agent.seeing.len(), agent.seeing_scores.len());
            }
        }
    }

    #[test]
    fn proptest_regrowth_is_exact(seed in any::<u64>(), config in world_config()) {
        let regrowth = config.food.regrowth_ticks as u64;
        let mut sim = Simulation::new(config, seed).unwrap();
        let mut eaten_at: HashMap<u32, u64> = HashMap::new();

        for _ in 0..TICKS {
            let report = sim.step().unwrap();
            for event in &report.events {
                match event.kind {
                    EventKind::Regrew { food_id, .. } => {
                        let eaten = eaten_at.remove(&food_id);
                        prop_assert_eq!(eaten.map(|t| t + regrowth), Some(event.tick));
                    }
                    EventKind::Consumed { food_id, .. } => {
                        prop_assert!(eaten_at.insert(food_id, event.tick).is_none());
                    }
                    _ => {}
                }
            }
            for (food_id, tick) in &eaten_at {
                let food = sim.food().get(FoodId(*food_id)).unwrap();
                prop_assert!(food.consumed);
                prop_assert!(report.tick < tick + regrowth);
            }
        }
    }

    #[test]
    fn proptest_health_accounting(seed in any::<u64>(), config in world_config()) {
        let metabolism = config.agents.metabolism;
        let mut sim = Simulation::new(config, seed).unwrap();

        for _ in 0..TICKS {
            let before: HashMap<AgentId, f64> =
                sim.agents().iter().map(|a| (a.id, a.health)).collect();
            let report = sim.step().unwrap();

            let mut effect: HashMap<AgentId, f64> = HashMap::new();
            let mut died = HashSet::new();
            for event in &report.events {
                match event.kind {
                    EventKind::Consumed { agent_id, amount, .. } => {
                        let delta = if amount == 3 { -1.0 } else { amount as f64 };
                        effect.insert(AgentId(agent_id), delta);
                    }
                    EventKind::Died { agent_id, .. } => {
                        died.insert(AgentId(agent_id));
                    }
                    _ => {}
                }
            }

            for (id, health) in &before {
                let gained = effect.get(id).copied().unwrap_or(0.0);
                let expected = round_tenth(health + gained - metabolism);
                match sim.agents().get(*id) {
                    Some(agent) => {
                        prop_assert!(!died.contains(id));
                        prop_assert!((agent.health - expected).abs() < 1e-9);
                        if gained == 0.0 {
                            prop_assert!(agent.health < *health);
                        }
                    }
                    None => {
                        prop_assert!(died.contains(id));
                        prop_assert!(expected <= 0.0);
                    }
                }
            }
            if sim.is_extinct() {
                break;
            }
        }
    }
}

//! Agent Pipeline
//!
//! Each agent, in id order, takes a full turn before the next one starts:
//! move, look around, score what it sees, pick a target, eat, metabolize.
//! Earlier agents therefore win contested cells and contested food within a
//! tick. That ordering is part of the model, not an accident of iteration.

use bevy_ecs::prelude::*;
use rand::Rng;
use temperance_events::EventKind;

use crate::components::{Agent, AgentId, AgentRegistry, FoodId, FoodRegistry, GridPos, WorldState};
use crate::config::SimConfig;
use crate::error::SimError;
use crate::events::PendingEvents;
use crate::SimRng;

use super::consumption::{consume, SocialRules};
use super::decision::{decide, first_attractive};
use super::metabolism::metabolize;
use super::movement::{apply_move, candidate_cell, Intent, MoveOutcome};
use super::perception::look_around;

/// Invariant breaches found while running a tick
#[derive(Resource, Debug, Default)]
pub struct IntegrityLog {
    violations: Vec<SimError>,
}

impl IntegrityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: SimError) {
        self.violations.push(error);
    }

    pub fn drain(&mut self) -> Vec<SimError> {
        std::mem::take(&mut self.violations)
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Constants an agent turn needs, copied out of the config once per tick
#[derive(Debug, Clone, Copy)]
pub struct TurnRules {
    pub grid_size: u32,
    pub vision: u32,
    pub metabolism: f64,
    pub social: SocialRules,
}

impl From<&SimConfig> for TurnRules {
    fn from(config: &SimConfig) -> Self {
        Self {
            grid_size: config.world.grid_size,
            vision: config.agents.vision,
            metabolism: config.agents.metabolism,
            social: SocialRules {
                vision: config.agents.vision,
                pressure_step: config.agents.social_pressure_step,
            },
        }
    }
}

/// System: every living agent takes its turn
pub fn run_agent_pipeline(
    config: Res<SimConfig>,
    world_state: Res<WorldState>,
    mut rng: ResMut<SimRng>,
    mut agents: ResMut<AgentRegistry>,
    mut food: ResMut<FoodRegistry>,
    mut events: ResMut<PendingEvents>,
    mut integrity: ResMut<IntegrityLog>,
) {
    let tick = world_state.current_tick;
    let rules = TurnRules::from(&*config);

    for id in agents.ids() {
        let Some(mut agent) = agents.remove(id) else {
            continue;
        };
        let result = take_turn(
            &mut agent,
            tick,
            rules,
            &mut agents,
            &mut food,
            &mut rng.0,
            &mut events,
        );
        agents.register(agent);

        if let Err(err) = result {
            tracing::error!(tick, agent = %id, "agent turn aborted: {}", err);
            integrity.push(err);
        }
    }
}

/// One agent's turn. The agent is held outside the registry for the
/// duration, so `others` is everyone else.
pub fn take_turn<R: Rng + ?Sized>(
    agent: &mut Agent,
    tick: u64,
    rules: TurnRules,
    others: &mut AgentRegistry,
    food: &mut FoodRegistry,
    rng: &mut R,
    events: &mut PendingEvents,
) -> Result<(), SimError> {
    if !agent.is_alive() {
        return Ok(());
    }

    // Move
    let target = pursued_position(agent, food)?;
    let intent = Intent::for_agent(agent, target);
    let candidate = candidate_cell(agent.position, intent, rules.grid_size, rng);
    match apply_move(others, agent, candidate) {
        MoveOutcome::Moved { from, to } => events.push(
            tick,
            EventKind::Moved {
                agent_id: agent.id.0,
                from: from.into(),
                to: to.into(),
            },
        ),
        MoveOutcome::Blocked { at, wanted } => events.push(
            tick,
            EventKind::Blocked {
                agent_id: agent.id.0,
                at: at.into(),
                wanted: wanted.into(),
            },
        ),
        MoveOutcome::Stayed(_) => {}
    }

    // Look around and score everything in view
    agent.seeing = look_around(agent.position, rules.vision, food, rng);
    let viewer: &Agent = agent;
    let scores = viewer
        .seeing
        .iter()
        .map(|id| {
            food.get(*id)
                .map(|patch| decide(viewer, patch))
                .ok_or_else(|| stale(viewer.id, *id, "seeing"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    agent.seeing_scores = scores;

    // Pick a target unless already committed to one
    if agent.pursuing.is_none() {
        agent.consuming = None;
        agent.punished = false;
        if let Some(index) = first_attractive(&agent.seeing_scores) {
            let chosen = agent.seeing[index];
            agent.pursuing = Some(chosen);
            tracing::debug!(tick, agent = %agent.id, food = %chosen, "started pursuit");
            events.push(
                tick,
                EventKind::PursuitStarted {
                    agent_id: agent.id.0,
                    food_id: chosen.0,
                    score: agent.seeing_scores[index].total,
                },
            );
        }
    }

    // Eat if standing on the target
    if let Some(meal) = consume(agent, others, food, rules.social)? {
        tracing::debug!(
            tick,
            agent = %agent.id,
            food = %meal.food,
            amount = meal.amount.units(),
            witnessed = meal.witnessed,
            punished = meal.punished,
            "consumed food"
        );
        events.push(
            tick,
            EventKind::Consumed {
                agent_id: agent.id.0,
                food_id: meal.food.0,
                amount: meal.amount.units(),
                health_after: agent.health,
                witnessed: meal.witnessed,
                punished: meal.punished,
            },
        );
        for rival in meal.invalidated {
            events.push(
                tick,
                EventKind::PursuitInvalidated {
                    agent_id: rival.0,
                    food_id: meal.food.0,
                },
            );
        }
    }

    // Metabolize
    if !metabolize(agent, rules.metabolism) {
        tracing::info!(tick, agent = %agent.id, at = %agent.position, "agent starved");
        events.push(
            tick,
            EventKind::Died {
                agent_id: agent.id.0,
                at: agent.position.into(),
            },
        );
    }

    Ok(())
}

/// Position of the food the agent is walking towards, if any.
fn pursued_position(agent: &Agent, food: &FoodRegistry) -> Result<Option<GridPos>, SimError> {
    let Some(id) = agent.pursuing else {
        return Ok(None);
    };
    food.get(id)
        .filter(|patch| patch.is_available())
        .map(|patch| Some(patch.position))
        .ok_or_else(|| stale(agent.id, id, "pursuing"))
}

/// Checks that no agent points at food it can no longer have.
///
/// At a tick boundary a pursuit must name an uneaten patch, a consumption
/// must name a patch that is currently eaten, and no agent holds both.
pub fn verify_references(agents: &AgentRegistry, food: &FoodRegistry) -> Result<(), SimError> {
    for agent in agents.iter() {
        if let Some(id) = agent.pursuing {
            let valid = food.get(id).is_some_and(|f| f.is_available()) && agent.consuming.is_none();
            if !valid {
                return Err(stale(agent.id, id, "pursuing"));
            }
        }
        if let Some(id) = agent.consuming {
            if !food.get(id).is_some_and(|f| f.consumed) {
                return Err(stale(agent.id, id, "consuming"));
            }
        }
    }
    Ok(())
}

fn stale(agent: AgentId, food: FoodId, role: &'static str) -> SimError {
    SimError::StaleReference { agent, food, role }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Food, FoodAmount};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rules() -> TurnRules {
        TurnRules::from(&SimConfig::default())
    }

    fn food_at(id: u32, x: i32, y: i32, amount: FoodAmount) -> Food {
        Food::new(FoodId(id), GridPos::new(x, y), amount, 3)
    }

    #[test]
    fn test_turn_walks_to_food_and_eats_it() {
        let mut food = FoodRegistry::new();
        food.register(food_at(0, 2, 2, FoodAmount::Two));
        let mut others = AgentRegistry::new();
        let mut agent = Agent::new(AgentId(0), GridPos::new(1, 1), 7.0).with_pursuit(FoodId(0));
        let mut events = PendingEvents::new();
        let mut rng = SmallRng::seed_from_u64(5);

        take_turn(&mut agent, 1, rules(), &mut others, &mut food, &mut rng, &mut events).unwrap();

        assert_eq!(agent.position, GridPos::new(2, 2));
        assert_eq!(agent.consuming, Some(FoodId(0)));
        assert_eq!(agent.pursuing, None);
        // 7 + 2 - 0.5
        assert_eq!(agent.health, 8.5);

        let kinds: Vec<_> = events.drain().into_iter().map(|e| e.event_type()).collect();
        assert_eq!(
            kinds,
            vec![temperance_events::EventType::Moved, temperance_events::EventType::Consumed]
        );
    }

    #[test]
    fn test_consuming_agent_stays_and_then_picks_again() {
        let mut food = FoodRegistry::new();
        food.register(food_at(0, 2, 2, FoodAmount::One));
        food.register(food_at(1, 3, 2, FoodAmount::One));
        food.get_mut(FoodId(0)).unwrap().consumed = true;
        let mut others = AgentRegistry::new();
        let mut agent = Agent::new(AgentId(0), GridPos::new(2, 2), 5.0);
        agent.consuming = Some(FoodId(0));
        agent.punished = true;
        let mut events = PendingEvents::new();
        let mut rng = SmallRng::seed_from_u64(5);

        take_turn(&mut agent, 2, rules(), &mut others, &mut food, &mut rng, &mut events).unwrap();

        assert_eq!(agent.position, GridPos::new(2, 2));
        assert_eq!(agent.consuming, None);
        assert!(!agent.punished);
        assert_eq!(agent.seeing, vec![FoodId(1)]);
        assert_eq!(agent.pursuing, Some(FoodId(1)));
    }

    #[test]
    fn test_nothing_attractive_leaves_agent_unattached() {
        let mut food = FoodRegistry::new();
        food.register(food_at(0, 1, 1, FoodAmount::Three));
        let mut others = AgentRegistry::new();
        let mut agent = Agent::new(AgentId(0), GridPos::new(2, 2), 10.0);
        agent.times_sick_3 = 3;
        let mut events = PendingEvents::new();
        let mut rng = SmallRng::seed_from_u64(11);

        take_turn(&mut agent, 1, rules(), &mut others, &mut food, &mut rng, &mut events).unwrap();

        assert_eq!(agent.seeing.len(), 1);
        assert_eq!(agent.seeing_scores.len(), 1);
        assert_eq!(agent.seeing_scores[0].total, 0.0);
        assert_eq!(agent.pursuing, None);
    }

    #[test]
    fn test_starving_agent_reports_death() {
        let mut food = FoodRegistry::new();
        let mut others = AgentRegistry::new();
        let mut agent = Agent::new(AgentId(4), GridPos::new(0, 0), 0.5);
        let mut events = PendingEvents::new();
        let mut rng = SmallRng::seed_from_u64(1);

        take_turn(&mut agent, 9, rules(), &mut others, &mut food, &mut rng, &mut events).unwrap();

        assert!(!agent.is_alive());
        let died = events
            .drain()
            .into_iter()
            .find(|e| e.event_type() == temperance_events::EventType::Died);
        assert_eq!(died.map(|e| e.tick), Some(9));
    }

    #[test]
    fn test_pursuit_of_eaten_food_is_reported() {
        let mut food = FoodRegistry::new();
        food.register(food_at(0, 4, 4, FoodAmount::One));
        food.get_mut(FoodId(0)).unwrap().consumed = true;
        let mut others = AgentRegistry::new();
        let mut agent = Agent::new(AgentId(0), GridPos::new(0, 0), 10.0).with_pursuit(FoodId(0));
        let mut events = PendingEvents::new();
        let mut rng = SmallRng::seed_from_u64(1);

        let err = take_turn(&mut agent, 1, rules(), &mut others, &mut food, &mut rng, &mut events)
            .unwrap_err();
        assert!(matches!(err, SimError::StaleReference { role: "pursuing", .. }));
    }

    #[test]
    fn test_verify_references() {
        let mut food = FoodRegistry::new();
        food.register(food_at(0, 0, 0, FoodAmount::One));
        food.register(food_at(1, 4, 4, FoodAmount::Two));
        food.get_mut(FoodId(1)).unwrap().consumed = true;

        let mut agents = AgentRegistry::new();
        agents.register(Agent::new(AgentId(0), GridPos::new(1, 1), 9.0).with_pursuit(FoodId(0)));
        let mut eater = Agent::new(AgentId(1), GridPos::new(4, 4), 9.0);
        eater.consuming = Some(FoodId(1));
        agents.register(eater);
        assert!(verify_references(&agents, &food).is_ok());

        agents.get_mut(AgentId(0)).unwrap().pursuing = Some(FoodId(1));
        assert!(verify_references(&agents, &food).is_err());

        agents.get_mut(AgentId(0)).unwrap().pursuing = Some(FoodId(7));
        assert!(verify_references(&agents, &food).is_err());

        agents.get_mut(AgentId(0)).unwrap().pursuing = None;
        agents.get_mut(AgentId(1)).unwrap().consuming = Some(FoodId(0));
        assert!(verify_references(&agents, &food).is_err());
    }
}

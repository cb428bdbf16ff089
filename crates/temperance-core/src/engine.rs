//! World Engine
//!
//! Owns the ECS world and the per-tick schedule. One call to
//! [`Simulation::step`] is one tick:
//!
//! 1. advance the clock
//! 2. regrow food
//! 3. run every agent's turn in id order
//! 4. remove agents that starved during the pass
//!
//! After the schedule the engine drains the tick's events and checks that no
//! agent is left pointing at food it cannot have.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::ExecutorKind;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use temperance_events::{EventType, SimEvent, WorldSnapshot};

use crate::components::{AgentRegistry, FoodRegistry, WorldState};
use crate::config::SimConfig;
use crate::error::Result;
use crate::events::PendingEvents;
use crate::output::build_snapshot;
use crate::setup::populate;
use crate::systems::{
    reap_dead_agents, regrow_food, run_agent_pipeline, verify_references, IntegrityLog,
};
use crate::SimRng;

/// What happened during one tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<SimEvent>,
}

impl TickReport {
    pub fn count(&self, event_type: EventType) -> usize {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .count()
    }
}

pub struct Simulation {
    world: World,
    schedule: Schedule,
}

impl Simulation {
    /// Validate the config and place agents and food at random.
    pub fn new(config: SimConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let (agents, food) = populate(&config, &mut rng)?;
        Ok(Self::assemble(config, agents, food, rng))
    }

    /// Start from hand-built registries instead of random placement.
    pub fn with_registries(
        config: SimConfig,
        agents: AgentRegistry,
        food: FoodRegistry,
        seed: u64,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(
            config,
            agents,
            food,
            SmallRng::seed_from_u64(seed),
        ))
    }

    fn assemble(
        config: SimConfig,
        agents: AgentRegistry,
        food: FoodRegistry,
        rng: SmallRng,
    ) -> Self {
        let mut world = World::new();
        world.insert_resource(config);
        world.insert_resource(SimRng(rng));
        world.insert_resource(WorldState::new());
        world.insert_resource(agents);
        world.insert_resource(food);
        world.insert_resource(PendingEvents::new());
        world.insert_resource(IntegrityLog::new());

        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);
        schedule.add_systems(
            (
                advance_clock,
                regrow_food,
                run_agent_pipeline,
                reap_dead_agents,
            )
                .chain(),
        );

        Self { world, schedule }
    }

    /// Run one tick.
    pub fn step(&mut self) -> Result<TickReport> {
        self.schedule.run(&mut self.world);

        let tick = self.tick();
        let events = self.world.resource_mut::<PendingEvents>().drain();
        if let Some(err) = self
            .world
            .resource_mut::<IntegrityLog>()
            .drain()
            .into_iter()
            .next()
        {
            return Err(err);
        }
        verify_references(self.agents(), self.food())?;

        tracing::debug!(
            tick,
            events = events.len(),
            agents = self.agents().len(),
            "tick complete"
        );
        Ok(TickReport { tick, events })
    }

    /// Ticks completed so far
    pub fn tick(&self) -> u64 {
        self.world.resource::<WorldState>().current_tick
    }

    pub fn agents(&self) -> &AgentRegistry {
        self.world.resource::<AgentRegistry>()
    }

    pub fn food(&self) -> &FoodRegistry {
        self.world.resource::<FoodRegistry>()
    }

    pub fn config(&self) -> &SimConfig {
        self.world.resource::<SimConfig>()
    }

    pub fn is_extinct(&self) -> bool {
        self.agents().is_empty()
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        build_snapshot(
            self.tick(),
            self.config().world.grid_size,
            self.agents(),
            self.food(),
        )
    }
}

/// System: start a new tick
pub fn advance_clock(mut world_state: ResMut<WorldState>) {
    world_state.advance_tick();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Agent, AgentId, Food, FoodAmount, FoodId, GridPos};
    use crate::error::SimError;

    #[test]
    fn test_new_places_everything() {
        let sim = Simulation::new(SimConfig::default(), 42).unwrap();
        assert_eq!(sim.tick(), 0);
        assert_eq!(sim.agents().len(), 3);
        assert_eq!(sim.food().len(), 5);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = SimConfig::default();
        config.agents.vision = 0;
        assert!(matches!(
            Simulation::new(config, 1),
            Err(SimError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_step_advances_clock() {
        let mut sim = Simulation::new(SimConfig::default(), 42).unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.tick, 1);
        assert_eq!(sim.tick(), 1);
        assert!(report.events.iter().all(|e| e.tick == 1));
    }

    #[test]
    fn test_starving_agent_is_gone_after_the_tick() {
        let mut agents = AgentRegistry::new();
        agents.register(Agent::new(AgentId(0), GridPos::new(0, 0), 0.5));
        agents.register(Agent::new(AgentId(1), GridPos::new(4, 4), 10.0));
        let food = FoodRegistry::new();

        let mut sim =
            Simulation::with_registries(SimConfig::default(), agents, food, 3).unwrap();
        let report = sim.step().unwrap();

        assert_eq!(report.count(EventType::Died), 1);
        assert!(sim.agents().get(AgentId(0)).is_none());
        assert_eq!(sim.agents().len(), 1);
        assert!(!sim.is_extinct());
    }

    #[test]
    fn test_regrowth_event_is_reported() {
        let mut food = FoodRegistry::new();
        let mut patch = Food::new(FoodId(0), GridPos::new(2, 2), FoodAmount::One, 3);
        patch.consumed = true;
        patch.regrowth_timer = 1;
        food.register(patch);

        let mut sim =
            Simulation::with_registries(SimConfig::default(), AgentRegistry::new(), food, 3)
                .unwrap();
        let report = sim.step().unwrap();
        assert_eq!(report.count(EventType::Regrew), 1);
        assert!(sim.food().get(FoodId(0)).unwrap().is_available());
        assert!(sim.is_extinct());
    }

    #[test]
    fn test_snapshot_matches_state() {
        let sim = Simulation::new(SimConfig::default(), 8).unwrap();
        let snapshot = sim.snapshot();
        assert_eq!(snapshot.tick, 0);
        assert_eq!(snapshot.grid_size, 5);
        assert_eq!(snapshot.agents.len(), 3);
        assert_eq!(snapshot.food.len(), 5);
    }
}

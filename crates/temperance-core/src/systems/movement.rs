//! Movement System
//!
//! Picks the cell an agent wants this tick and resolves it against the
//! other agents on the grid.

use rand::Rng;

use crate::components::{Agent, AgentRegistry, GridPos};

/// Where an agent tries to go this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// One king move towards the pursued food
    Approach(GridPos),
    /// Eating what it reached last tick
    Stay,
    /// Random walk, standing still included
    Wander,
}

impl Intent {
    /// `target` is the position of the pursued food, already resolved.
    pub fn for_agent(agent: &Agent, target: Option<GridPos>) -> Self {
        match target {
            Some(target) => Intent::Approach(target),
            None if agent.consuming.is_some() => Intent::Stay,
            None => Intent::Wander,
        }
    }
}

/// Result of trying to move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved { from: GridPos, to: GridPos },
    /// The candidate cell belonged to another agent
    Blocked { at: GridPos, wanted: GridPos },
    Stayed(GridPos),
}

/// Candidate cell for this tick, clamped to the grid.
pub fn candidate_cell<R: Rng + ?Sized>(
    from: GridPos,
    intent: Intent,
    grid_size: u32,
    rng: &mut R,
) -> GridPos {
    let raw = match intent {
        Intent::Approach(target) => from.step_toward(target),
        Intent::Stay => from,
        Intent::Wander => from.offset(rng.gen_range(-1..=1), rng.gen_range(-1..=1)),
    };
    raw.clamp_to(grid_size)
}

/// Move the agent to `candidate` unless another living agent holds it, in
/// which case the agent keeps its cell for this tick.
pub fn apply_move(agents: &AgentRegistry, agent: &mut Agent, candidate: GridPos) -> MoveOutcome {
    let from = agent.position;
    if candidate == from {
        return MoveOutcome::Stayed(from);
    }
    if agents.occupant_at(candidate).is_some() {
        return MoveOutcome::Blocked {
            at: from,
            wanted: candidate,
        };
    }
    agent.position = candidate;
    MoveOutcome::Moved { from, to: candidate }
}

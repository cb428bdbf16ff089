//! Placement Generator
//!
//! Random, collision-free starting cells for agents and food.

use rand::Rng;
use std::collections::HashSet;

use crate::components::{
    Agent, AgentId, AgentRegistry, Food, FoodAmount, FoodId, FoodRegistry, GridPos,
};
use crate::config::SimConfig;
use crate::error::{Result, SimError};

/// Random draws per entity before falling back to picking among free cells
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1_000;

const AMOUNTS: [FoodAmount; 3] = [FoodAmount::One, FoodAmount::Two, FoodAmount::Three];

/// Draw `count` distinct cells on a `grid_size` square grid.
///
/// Fails with `PlacementExhausted` when the grid has fewer cells than asked
/// for. `kind` names what is being placed in that error.
pub fn place_cells<R: Rng + ?Sized>(
    count: usize,
    grid_size: u32,
    kind: &'static str,
    rng: &mut R,
) -> Result<Vec<GridPos>> {
    let capacity = (grid_size as usize).pow(2);
    let exhausted = || SimError::PlacementExhausted {
        kind,
        requested: count,
        capacity,
    };
    if count > capacity {
        return Err(exhausted());
    }

    let mut taken = HashSet::with_capacity(count);
    let mut cells = Vec::with_capacity(count);
    for _ in 0..count {
        let cell = draw_free_cell(&taken, grid_size, rng).ok_or_else(exhausted)?;
        taken.insert(cell);
        cells.push(cell);
    }
    Ok(cells)
}

fn draw_free_cell<R: Rng + ?Sized>(
    taken: &HashSet<GridPos>,
    grid_size: u32,
    rng: &mut R,
) -> Option<GridPos> {
    let size = grid_size as i32;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let cell = GridPos::new(rng.gen_range(0..size), rng.gen_range(0..size));
        if !taken.contains(&cell) {
            return Some(cell);
        }
    }

    // Crowded grid: choose uniformly among what is left
    let free: Vec<GridPos> = (0..size)
        .flat_map(|y| (0..size).map(move |x| GridPos::new(x, y)))
        .filter(|cell| !taken.contains(cell))
        .collect();
    if free.is_empty() {
        return None;
    }
    Some(free[rng.gen_range(0..free.len())])
}

/// Uniform pick of 1, 2 or 3 units
pub fn random_amount<R: Rng + ?Sized>(rng: &mut R) -> FoodAmount {
    AMOUNTS[rng.gen_range(0..AMOUNTS.len())]
}

/// Build both registries for a fresh run.
///
/// Agents never share a cell with each other and food never shares a cell
/// with other food; an agent may start on top of a food patch.
pub fn populate<R: Rng + ?Sized>(
    config: &SimConfig,
    rng: &mut R,
) -> Result<(AgentRegistry, FoodRegistry)> {
    let grid_size = config.world.grid_size;

    let mut agents = AgentRegistry::new();
    for (i, cell) in place_cells(config.agents.count, grid_size, "agents", rng)?
        .into_iter()
        .enumerate()
    {
        agents.register(Agent::new(
            AgentId(i as u32),
            cell,
            config.agents.starting_health,
        ));
    }

    let mut food = FoodRegistry::new();
    for (i, cell) in place_cells(config.food.count, grid_size, "food", rng)?
        .into_iter()
        .enumerate()
    {
        food.register(Food::new(
            FoodId(i as u32),
            cell,
            random_amount(rng),
            config.food.regrowth_ticks,
        ));
    }

    tracing::info!(
        agents = agents.len(),
        food = food.len(),
        grid_size,
        "placed agents and food"
    );
    Ok((agents, food))
}

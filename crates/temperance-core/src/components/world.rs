//! World Components
//!
//! Grid coordinates and the simulation clock.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use temperance_events::Cell;

/// A cell on the square grid. Valid cells lie in `[0, grid_size - 1]` on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance: the number of king moves between two cells.
    pub fn chebyshev(&self, other: GridPos) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Whether `other` lies inside the square box of side `2 * radius + 1`
    /// centred on this cell.
    pub fn within(&self, other: GridPos, radius: u32) -> bool {
        self.chebyshev(other) <= radius as i32
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// One king move towards `target`, each axis stepping by its sign.
    pub fn step_toward(&self, target: GridPos) -> Self {
        self.offset((target.x - self.x).signum(), (target.y - self.y).signum())
    }

    /// Pull the cell back inside a closed world of the given side length.
    pub fn clamp_to(&self, grid_size: u32) -> Self {
        let max = grid_size as i32 - 1;
        Self::new(self.x.clamp(0, max), self.y.clamp(0, max))
    }

    pub fn in_bounds(&self, grid_size: u32) -> bool {
        let size = grid_size as i32;
        (0..size).contains(&self.x) && (0..size).contains(&self.y)
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<GridPos> for Cell {
    fn from(pos: GridPos) -> Self {
        Cell::new(pos.x, pos.y)
    }
}

/// Global clock
#[derive(Resource, Debug, Clone, Default)]
pub struct WorldState {
    /// Ticks completed so far; 0 before the first step
    pub current_tick: u64,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update world state for a new tick
    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }
}

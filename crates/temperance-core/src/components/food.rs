//! Food Components
//!
//! Food patches sit on fixed cells, hold a fixed amount, and cycle between
//! available and consumed for the whole run.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::world::GridPos;

/// Stable identifier for a food patch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FoodId(pub u32);

impl std::fmt::Display for FoodId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// How many units a patch holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodAmount {
    One,
    Two,
    Three,
}

impl FoodAmount {
    pub fn units(&self) -> u8 {
        match self {
            FoodAmount::One => 1,
            FoodAmount::Two => 2,
            FoodAmount::Three => 3,
        }
    }

    /// Health change from eating the patch. Three units is too much and
    /// makes the agent sick.
    pub fn health_effect(&self) -> f64 {
        match self {
            FoodAmount::One => 1.0,
            FoodAmount::Two => 2.0,
            FoodAmount::Three => -1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub position: GridPos,
    pub amount: FoodAmount,
    pub consumed: bool,
    /// Ticks left before a consumed patch is available again
    pub regrowth_timer: u32,
}

impl Food {
    pub fn new(id: FoodId, position: GridPos, amount: FoodAmount, regrowth_ticks: u32) -> Self {
        Self {
            id,
            position,
            amount,
            consumed: false,
            regrowth_timer: regrowth_ticks,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.consumed
    }

    /// Count down one tick of regrowth. Returns true when the patch came back
    /// this tick, at which point the timer is reset for the next cycle.
    pub fn tick_regrowth(&mut self, regrowth_ticks: u32) -> bool {
        if !self.consumed {
            return false;
        }
        self.regrowth_timer = self.regrowth_timer.saturating_sub(1);
        if self.regrowth_timer == 0 {
            self.regrowth_timer = regrowth_ticks;
            self.consumed = false;
            return true;
        }
        false
    }
}

/// Every food patch in the world, keyed by id
#[derive(Resource, Debug, Clone, Default)]
pub struct FoodRegistry {
    food: BTreeMap<FoodId, Food>,
}

impl FoodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a food patch
    pub fn register(&mut self, food: Food) {
        self.food.insert(food.id, food);
    }

    pub fn get(&self, id: FoodId) -> Option<&Food> {
        self.food.get(&id)
    }

    pub fn get_mut(&mut self, id: FoodId) -> Option<&mut Food> {
        self.food.get_mut(&id)
    }

    /// All patches in id order
    pub fn iter(&self) -> impl Iterator<Item = &Food> {
        self.food.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Food> {
        self.food.values_mut()
    }

    /// Uneaten patches inside the vision box around `centre`, in id order
    pub fn available_within(&self, centre: GridPos, radius: u32) -> Vec<FoodId> {
        self.food
            .values()
            .filter(|f| f.is_available() && centre.within(f.position, radius))
            .map(|f| f.id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.food.len()
    }

    pub fn is_empty(&self) -> bool {
        self.food.is_empty()
    }
}

//! Food Regrowth System

use bevy_ecs::prelude::*;
use temperance_events::EventKind;

use crate::components::{FoodId, FoodRegistry, WorldState};
use crate::config::SimConfig;
use crate::events::PendingEvents;

/// Count down every consumed patch; returns the ones that came back.
pub fn regrow(food: &mut FoodRegistry, regrowth_ticks: u32) -> Vec<FoodId> {
    food.iter_mut()
        .filter_map(|f| f.tick_regrowth(regrowth_ticks).then_some(f.id))
        .collect()
}

/// System: runs once per tick, before any agent acts
pub fn regrow_food(
    config: Res<SimConfig>,
    world_state: Res<WorldState>,
    mut food: ResMut<FoodRegistry>,
    mut events: ResMut<PendingEvents>,
) {
    for id in regrow(&mut food, config.food.regrowth_ticks) {
        let Some(patch) = food.get(id) else {
            continue;
        };
        tracing::debug!(tick = world_state.current_tick, food = %id, at = %patch.position, "food regrew");
        events.push(
            world_state.current_tick,
            EventKind::Regrew {
                food_id: id.0,
                at: patch.position.into(),
            },
        );
    }
}

//! Perception System
//!
//! Finds the uneaten food inside an agent's vision box.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::components::{FoodId, FoodRegistry, GridPos};

/// Every available food patch within `vision` (Chebyshev) of `position`,
/// shuffled.
///
/// Pursuit picks the first attractive entry rather than the best one, so the
/// shuffle is what breaks ties between equally scored patches.
pub fn look_around<R: Rng + ?Sized>(
    position: GridPos,
    vision: u32,
    food: &FoodRegistry,
    rng: &mut R,
) -> Vec<FoodId> {
    let mut seeing = food.available_within(position, vision);
    seeing.shuffle(rng);
    seeing
}

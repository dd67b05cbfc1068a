//! Food batch generation

use rand::Rng;

use super::state::{GameState, sample_tile};
use crate::consts::MAX_FOOD_BATCH;

/// Replace the food set with a fresh batch of 1 to 3 items anywhere on the
/// grid that is not snake, wall, or other food. Returns how many items could
/// not be placed.
pub fn generate_food(state: &mut GameState) -> usize {
    state.food.clear();
    let count = state.rng.random_range(1..=MAX_FOOD_BATCH);
    let range = state.config.full_range();
    let attempts = state.config.placement_attempts;
    let mut skipped = 0;

    for _ in 0..count {
        let candidate = {
            let (snake, walls, food) = (&state.snake, &state.walls, &state.food);
            sample_tile(&mut state.rng, range.clone(), attempts, |tile| {
                !snake.contains(&tile) && !food.contains(&tile) && !walls.contains(&tile)
            })
        };

        match candidate {
            Some(tile) => state.food.push(tile),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Food generation skipped {} of {} items, grid is full", skipped, count);
    }
    skipped
}

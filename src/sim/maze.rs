//! Maze wall generation
//!
//! Each pass keeps a random 90% of the previous walls and tops the set back up
//! with fresh walls drawn from the grid interior, so the maze shifts a little
//! every time the food runs out while the wall count stays put.

use rand::seq::SliceRandom;

use super::state::{GameState, Tile, sample_tile};
use crate::consts::*;
use crate::manhattan;

/// Number of walls placed by the very first pass on an empty grid:
/// 20% of the perimeter plus 2% of the area.
pub fn initial_wall_quota(tile_count: i32) -> usize {
    let tile_count = tile_count.max(0) as usize;
    tile_count * 4 / 5 + tile_count * tile_count / 50
}

/// Rebuild the wall set in place. Returns how many walls could not be placed.
pub fn generate_maze(state: &mut GameState) -> usize {
    let mut walls = std::mem::take(&mut state.walls);
    let previous_count = walls.len();

    walls.shuffle(&mut state.rng);
    walls.truncate(previous_count * WALL_RETAIN_NUM / WALL_RETAIN_DEN);
    let retained = walls.len();

    let to_generate = if previous_count > 0 {
        previous_count - retained
    } else {
        initial_wall_quota(state.config.tile_count)
    };

    let head = state.head();
    let range = state.config.wall_range();
    let attempts = state.config.placement_attempts;
    let mut skipped = 0;

    for _ in 0..to_generate {
        let candidate = {
            let (snake, food, placed) = (&state.snake, &state.food, &walls);
            sample_tile(&mut state.rng, range.clone(), attempts, |tile| {
                wall_allowed(tile, head, placed)
                    && !snake.contains(&tile)
                    && !food.contains(&tile)
            })
        };

        match candidate {
            Some(tile) => walls.push(tile),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!("Maze generation skipped {} of {} walls, no free tile", skipped, to_generate);
    }
    log::debug!(
        "Maze pass: kept {} of {} walls, placed {}",
        retained,
        previous_count,
        to_generate - skipped
    );

    state.walls = walls;
    skipped
}

/// Spacing rules for a new wall: clear of the head and not touching another wall
fn wall_allowed(tile: Tile, head: Tile, walls: &[Tile]) -> bool {
    manhattan(tile, head) >= WALL_HEAD_CLEARANCE
        && walls.iter().all(|&wall| manhattan(tile, wall) >= WALL_SPACING)
}

//! Game state and core simulation types
//!
//! Everything the simulation owns lives here: grid geometry, the seeded RNG,
//! the snake, food and walls, and the mode flags.

use std::collections::VecDeque;
use std::ops::RangeInclusive;

use glam::IVec2;
use rand::Rng;
use rand::SeedableRng;
use rand::seq::IndexedRandom;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::{food, maze};
use crate::consts::*;

/// A grid cell, `0 <= x, y < tile_count`
pub type Tile = IVec2;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake idles until the first direction, then moves every `move_delay` ticks
    Playing,
    /// Movement and steering suspended
    Paused,
    /// Run ended, only a restart leaves this phase
    GameOver,
}

/// Steering direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step in tile space (y grows downward)
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Head left the grid
    Boundary,
    /// Head ran into the snake's own body
    SelfBody,
    /// Head ran into a maze wall
    Wall,
}

/// Result of a single `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Nothing moved (cadence not reached, no direction yet, paused or over)
    Idle,
    /// Head advanced one tile, tail followed
    Moved,
    /// Head advanced onto food, snake grew
    Ate,
    /// Move rejected, game over
    Crashed(Collision),
}

/// Fixed simulation parameters, derived from `Settings` by the front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Grid edge length in tiles
    pub tile_count: i32,
    /// Ticks between snake steps
    pub move_delay: u32,
    /// Ticks between eating the last food and rebuilding maze and food
    pub regen_delay_ticks: u64,
    /// Spawn tile for a fresh snake
    pub start_tile: Tile,
    /// Random draws per wall/food placement before the fallback scan
    pub placement_attempts: u32,
}

impl SimConfig {
    /// Build a config, clamping values the simulation cannot run with
    pub fn new(tile_count: i32, move_delay: u32, regen_delay_ticks: u64) -> Self {
        let tile_count = tile_count.clamp(1, MAX_TILE_COUNT);
        let start_tile = IVec2::from(START_TILE).clamp(IVec2::ZERO, IVec2::splat(tile_count - 1));
        Self {
            tile_count,
            move_delay: move_delay.max(1),
            regen_delay_ticks,
            start_tile,
            placement_attempts: PLACEMENT_ATTEMPTS,
        }
    }

    pub fn in_bounds(&self, tile: Tile) -> bool {
        tile.cmpge(IVec2::ZERO).all() && tile.cmplt(IVec2::splat(self.tile_count)).all()
    }

    /// Axis range covering the whole grid
    pub fn full_range(&self) -> RangeInclusive<i32> {
        0..=self.tile_count - 1
    }

    /// Axis range new walls are drawn from (empty on tiny grids)
    pub fn wall_range(&self) -> RangeInclusive<i32> {
        WALL_EDGE_MARGIN..=self.tile_count - 1 - WALL_EDGE_MARGIN
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let tile_count = (WINDOW_SIZE / TILE_SIZE) as i32;
        let regen_delay_ticks = REGEN_DELAY_MS * FRAME_RATE as u64 / 1000;
        Self::new(tile_count, MOVE_DELAY, regen_delay_ticks)
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Grid and timing parameters
    pub config: SimConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Snake segments, head first
    pub snake: VecDeque<Tile>,
    /// Food tiles (set semantics, kept in placement order for determinism)
    pub food: Vec<Tile>,
    /// Maze wall tiles (set semantics, kept in placement order)
    pub walls: Vec<Tile>,
    /// Current heading, `None` until the first direction input
    pub direction: Option<Direction>,
    /// Score
    pub score: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Ticks since the last step
    pub move_counter: u32,
    /// Virtual monotonic clock, one unit per `tick`
    pub time_ticks: u64,
    /// Clock value at which maze and food regenerate, `Some` while pending
    pub regen_at: Option<u64>,
    /// RNG shared by the wall and food generators
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game with the given config and seed
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, seed, Pcg32::seed_from_u64(seed))
    }

    fn with_rng(config: SimConfig, seed: u64, rng: Pcg32) -> Self {
        let mut state = Self {
            snake: VecDeque::from([config.start_tile]),
            config,
            seed,
            food: Vec::new(),
            walls: Vec::new(),
            direction: None,
            score: 0,
            phase: GamePhase::Playing,
            move_counter: 0,
            time_ticks: 0,
            regen_at: None,
            rng,
        };

        maze::generate_maze(&mut state);
        food::generate_food(&mut state);
        log::info!(
            "New game: {}x{} grid, {} walls, {} food",
            state.config.tile_count,
            state.config.tile_count,
            state.walls.len(),
            state.food.len()
        );

        state
    }

    /// Replace this game with a fresh one.
    ///
    /// The RNG stream carries over so consecutive games get different mazes;
    /// any pending regeneration is dropped with the old state.
    pub fn reset(&mut self) {
        let rng = self.rng.clone();
        *self = Self::with_rng(self.config.clone(), self.seed, rng);
    }

    pub fn head(&self) -> Tile {
        self.snake[0]
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// True while the regeneration deadline is armed
    pub fn regen_pending(&self) -> bool {
        self.regen_at.is_some()
    }

    /// Steer the snake. Reversals, and steering while paused or over, are ignored.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.phase != GamePhase::Playing {
            return;
        }
        match self.direction {
            Some(current) if direction.is_opposite(current) => {}
            _ => self.direction = Some(direction),
        }
    }

    /// Flip between Playing and Paused. No effect once the game is over.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    /// Arm the one-shot regeneration deadline unless one is already pending
    pub(crate) fn arm_regeneration(&mut self) {
        if self.regen_at.is_none() {
            let at = self.time_ticks + self.config.regen_delay_ticks;
            log::debug!("Food cleared, maze regenerates at tick {}", at);
            self.regen_at = Some(at);
        }
    }

    /// Rebuild the maze, then the food, and disarm the deadline
    pub fn regenerate(&mut self) {
        maze::generate_maze(self);
        food::generate_food(self);
        self.regen_at = None;
        log::info!(
            "Maze regenerated: {} walls, {} food",
            self.walls.len(),
            self.food.len()
        );
        // No room for food: keep reshuffling the maze until some fits
        if self.food.is_empty() {
            self.arm_regeneration();
        }
    }

    /// First collision the head would suffer on `tile`, checked boundary, body, wall
    pub fn collision_at(&self, tile: Tile) -> Option<Collision> {
        if !self.config.in_bounds(tile) {
            Some(Collision::Boundary)
        } else if self.snake.contains(&tile) {
            Some(Collision::SelfBody)
        } else if self.walls.contains(&tile) {
            Some(Collision::Wall)
        } else {
            None
        }
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            tile_count: self.config.tile_count,
            snake: &self.snake,
            food: &self.food,
            walls: &self.walls,
            score: self.score,
            paused: self.is_paused(),
            game_over: self.is_game_over(),
            regen_pending: self.regen_pending(),
        }
    }
}

/// Everything needed to draw a frame, without access to generation internals
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub tile_count: i32,
    pub snake: &'a VecDeque<Tile>,
    pub food: &'a [Tile],
    pub walls: &'a [Tile],
    pub score: u64,
    pub paused: bool,
    pub game_over: bool,
    pub regen_pending: bool,
}

/// Pick a tile on `range x range` that satisfies `is_free`.
///
/// Draws uniformly up to `attempts` times, then scans every tile in the range
/// and picks one of the free ones. Returns `None` only when no tile is free.
pub(crate) fn sample_tile(
    rng: &mut Pcg32,
    range: RangeInclusive<i32>,
    attempts: u32,
    is_free: impl Fn(Tile) -> bool,
) -> Option<Tile> {
    if range.is_empty() {
        return None;
    }

    for _ in 0..attempts {
        let tile = IVec2::new(rng.random_range(range.clone()), rng.random_range(range.clone()));
        if is_free(tile) {
            return Some(tile);
        }
    }

    log::warn!("{} random draws failed, scanning for a free tile", attempts);
    let free: Vec<Tile> = range
        .clone()
        .flat_map(|y| range.clone().map(move |x| IVec2::new(x, y)))
        .filter(|&tile| is_free(tile))
        .collect();
    free.choose(rng).copied()
}

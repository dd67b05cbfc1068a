//! Maze Snake - a grid snake game with a regenerating maze
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, maze and food generation)
//! - `ui`: Pure HUD layout and pointer hit-testing, shared by renderer and input
//! - `settings`: JSON-backed configuration
//! - `term`: Terminal presentation layer

pub mod settings;
pub mod sim;
pub mod term;
pub mod ui;

pub use settings::Settings;

use glam::IVec2;

/// Game configuration constants
pub mod consts {
    /// Default render/input rate in ticks per second
    pub const FRAME_RATE: u32 = 60;
    /// Maximum simulation ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default window edge in pixels and tile edge in pixels (30x30 grid)
    pub const WINDOW_SIZE: u32 = 1200;
    pub const TILE_SIZE: u32 = 40;
    /// Smallest grid that still has an interior band for maze walls
    pub const MIN_TILE_COUNT: i32 = 12;
    /// Largest grid the generators and the terminal frame buffer accept
    pub const MAX_TILE_COUNT: i32 = 200;

    /// Ticks between snake steps
    pub const MOVE_DELAY: u32 = 15;
    /// Delay between eating the last food and rebuilding the maze
    pub const REGEN_DELAY_MS: u64 = 1000;
    /// Upper bound accepted from the settings file
    pub const MAX_REGEN_DELAY_MS: u64 = 60_000;

    /// Snake spawn tile
    pub const START_TILE: (i32, i32) = (10, 10);

    /// Points per food
    pub const FOOD_SCORE: u64 = 10;
    /// Food batch size is drawn from 1..=MAX_FOOD_BATCH
    pub const MAX_FOOD_BATCH: usize = 3;

    /// Share of walls kept on regeneration (numerator / denominator)
    pub const WALL_RETAIN_NUM: usize = 9;
    pub const WALL_RETAIN_DEN: usize = 10;
    /// Tiles on each side of the grid where new walls never spawn
    pub const WALL_EDGE_MARGIN: i32 = 5;
    /// New walls keep at least this Manhattan distance from the snake head
    pub const WALL_HEAD_CLEARANCE: i32 = 3;
    /// New walls keep at least this Manhattan distance from other walls
    pub const WALL_SPACING: i32 = 2;

    /// Random draws per placement before falling back to a full scan
    pub const PLACEMENT_ATTEMPTS: u32 = 1000;
}

/// Manhattan distance between two tiles
#[inline]
pub fn manhattan(a: IVec2, b: IVec2) -> i32 {
    (a - b).abs().element_sum()
}

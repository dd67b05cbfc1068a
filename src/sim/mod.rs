//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time is a tick counter
//! - Seeded RNG only
//! - Stable iteration order (walls and food keep placement order)
//! - No rendering or platform dependencies

pub mod food;
pub mod maze;
pub mod state;
pub mod tick;

pub use food::generate_food;
pub use maze::{generate_maze, initial_wall_quota};
pub use state::{
    Collision, Direction, GamePhase, GameState, SimConfig, Snapshot, StepOutcome, Tile,
};
pub use tick::{TickInput, tick};

//! Game settings
//!
//! Persisted as JSON next to the working directory. Missing or unreadable
//! files fall back to defaults.

use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::SimConfig;

/// Game settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Edge of the square play area in pixels
    pub window_size: u32,
    /// Edge of one tile in pixels
    pub tile_size: u32,
    /// Render ticks between snake steps
    pub move_delay: u32,
    /// Render/input ticks per second
    pub frame_rate: u32,
    /// Delay between eating the last food and the next maze
    pub regen_delay_ms: u64,
    /// Fixed RNG seed; random per launch when absent
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_size: WINDOW_SIZE,
            tile_size: TILE_SIZE,
            move_delay: MOVE_DELAY,
            frame_rate: FRAME_RATE,
            regen_delay_ms: REGEN_DELAY_MS,
            seed: None,
        }
    }
}

impl Settings {
    /// Settings file name
    pub const STORAGE_FILE: &'static str = "maze_snake_settings.json";

    /// Grid edge length in tiles
    pub fn tile_count(&self) -> i32 {
        (self.window_size / self.tile_size.max(1)).min(MAX_TILE_COUNT as u32) as i32
    }

    /// Regeneration delay rounded up to whole ticks
    pub fn regen_delay_ticks(&self) -> u64 {
        self.regen_delay_ms
            .saturating_mul(self.frame_rate as u64)
            .div_ceil(1000)
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Clamp values the game cannot run with
    pub fn sanitized(mut self) -> Self {
        self.tile_size = self.tile_size.clamp(1, u32::MAX / MAX_TILE_COUNT as u32);
        self.frame_rate = self.frame_rate.clamp(1, 1000);
        self.move_delay = self.move_delay.max(1);
        self.regen_delay_ms = self.regen_delay_ms.min(MAX_REGEN_DELAY_MS);

        let tiles = self.window_size / self.tile_size;
        let clamped = tiles.clamp(MIN_TILE_COUNT as u32, MAX_TILE_COUNT as u32);
        if tiles != clamped {
            log::warn!("Grid of {} tiles is out of range, using {}", tiles, clamped);
            self.window_size = self.tile_size * clamped;
        }
        self
    }

    /// Simulation parameters for these settings
    pub fn sim_config(&self) -> SimConfig {
        SimConfig::new(self.tile_count(), self.move_delay, self.regen_delay_ticks())
    }

    /// Load settings from the default file
    pub fn load() -> Self {
        Self::load_from(Path::new(Self::STORAGE_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(err) => {
                log::warn!("Could not read {}: {}, using defaults", path.display(), err);
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(err) => {
                log::warn!("Invalid settings in {}: {}, using defaults", path.display(), err);
                Self::default()
            }
        }
    }

    /// Save settings to the default file
    pub fn save(&self) -> io::Result<()> {
        self.save_to(Path::new(Self::STORAGE_FILE))
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

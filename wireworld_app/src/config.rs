// config.rs - Presentation tunables, read from TOML
//
// Tile size, colours and speed presets belong to the window only; the
// simulation core never sees them.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const MIN_TILE_SIZE: f32 = 8.0;
pub const MAX_TILE_SIZE: f32 = 64.0;

/// RGB triples per cell state.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Palette {
    pub dead: [u8; 3],
    pub wire: [u8; 3],
    pub head: [u8; 3],
    pub tail: [u8; 3],
    pub background: [u8; 3],
    /// Added to the red channel of the cell under the pointer.
    pub hover_boost: u8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            dead: [100, 100, 100],
            wire: [0, 0, 100],
            head: [100, 0, 0],
            tail: [0, 100, 0],
            background: [0, 0, 0],
            hover_boost: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub width: usize,
    pub height: usize,
    pub tile_size: f32,
    pub tick_interval_ms: u64,
    /// Intervals bound to the keys 1 to 4.
    pub speed_presets_ms: [u64; 4],
    pub save_path: PathBuf,
    /// Step with one tokio task per row instead of a single pass.
    pub concurrent_rows: bool,
    pub palette: Palette,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 100,
            height: 100,
            tile_size: 16.0,
            tick_interval_ms: 500,
            speed_presets_ms: [1, 500, 1000, 2000],
            save_path: PathBuf::from("save.csv"),
            concurrent_rows: false,
            palette: Palette::default(),
        }
    }
}

impl AppConfig {
    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config.clamped())
    }

    fn clamped(mut self) -> Self {
        self.tile_size = self.tile_size.clamp(MIN_TILE_SIZE, MAX_TILE_SIZE);
        self
    }
}

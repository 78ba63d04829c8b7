use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use pathfinder_core::{CellCount, Coord, DEFAULT_SIZE, GameConfig, GenerationLimits};
use serde::Deserialize;

/// Contents of the optional TOML config file. Missing keys keep their defaults.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Pause between a won or lost game and the next board, in milliseconds.
    pub reset_delay_ms: u64,
    pub board: BoardSettings,
    pub limits: GenerationLimits,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reset_delay_ms: 2000,
            board: Default::default(),
            limits: Default::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardSettings {
    pub size: Option<Coord>,
    /// Derived from `size` when omitted.
    pub obstacles: Option<CellCount>,
    /// Derived from `size` when omitted.
    pub min_distance: Option<CellCount>,
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Board configuration, with `size_override` (from the command line) winning over the file.
    pub fn game_config(&self, size_override: Option<Coord>) -> Result<GameConfig> {
        let size = size_override.or(self.board.size).unwrap_or(DEFAULT_SIZE);
        let obstacles = self
            .board
            .obstacles
            .unwrap_or_else(|| GameConfig::standard_obstacles(size));
        let min_distance = self
            .board
            .min_distance
            .unwrap_or_else(|| GameConfig::standard_min_distance(size));

        GameConfig::new(size, obstacles, min_distance)
            .with_context(|| format!("Invalid board settings for a {size}x{size} board"))
    }

    pub fn reset_delay(&self) -> Duration {
        Duration::from_millis(self.reset_delay_ms)
    }
}

use anyhow::{anyhow, Context, Result};
use std::env;

use crate::game::{
    rules::{DEFAULT_GRID_SIZE, DEFAULT_MAX_SELECTION},
    EngineConfig, GameMode,
};

#[derive(Debug, Clone)]
pub struct Config {
    pub game: GameConfig,
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    pub dictionary_path: String,
    pub rows: usize,
    pub columns: usize,
    pub max_selection: usize,
    pub mode: GameMode,
    pub start_level: u32,
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let game = GameConfig {
            dictionary_path: lookup("DICTIONARY_PATH")
                .unwrap_or_else(|| "./dictionary.txt".to_string()),
            rows: lookup("GRID_ROWS")
                .unwrap_or_else(|| DEFAULT_GRID_SIZE.to_string())
                .parse()
                .context("GRID_ROWS must be a number")?,
            columns: lookup("GRID_COLUMNS")
                .unwrap_or_else(|| DEFAULT_GRID_SIZE.to_string())
                .parse()
                .context("GRID_COLUMNS must be a number")?,
            max_selection: lookup("MAX_SELECTION")
                .unwrap_or_else(|| DEFAULT_MAX_SELECTION.to_string())
                .parse()
                .context("MAX_SELECTION must be a number")?,
            mode: lookup("GAME_MODE")
                .unwrap_or_else(|| "arcade".to_string())
                .parse()
                .map_err(|e| anyhow!("GAME_MODE: {}", e))?,
            start_level: lookup("START_LEVEL")
                .unwrap_or_else(|| "1".to_string())
                .parse()
                .context("START_LEVEL must be a number")?,
            seed: lookup("RNG_SEED")
                .map(|seed| seed.parse())
                .transpose()
                .context("RNG_SEED must be a number")?,
        };

        Ok(Config { game })
    }

    /// Engine parameters derived from this configuration, using the
    /// default letter, multiplier and break-point tables
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            rows: self.game.rows,
            columns: self.game.columns,
            max_selection: self.game.max_selection,
            mode: self.game.mode,
            ..EngineConfig::default()
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::{
    game::mode::GameMode,
    models::{Position, Tile},
};

/// Everything needed to resume a session. Produced by
/// `TileManager::snapshot` and consumed by `TileManager::restore`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineSnapshot {
    /// Rows of tiles, top to bottom, burn counters included
    pub grid: Vec<Vec<Tile>>,
    /// Selected positions, oldest first
    pub selection: Vec<Position>,
    /// Letter generator weights at the time of the snapshot
    pub current_probabilities: Vec<f64>,
    pub hot_streak: u32,
    pub cold_streak: u32,
    pub level: u32,
    pub mode: GameMode,
    pub game_over: bool,
}

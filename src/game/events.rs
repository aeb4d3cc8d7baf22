use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Position, Tile, TileCategory};

/// Why a selection attempt did nothing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionRejection {
    OutOfBounds,
    NotAdjacent,
    AlreadySelected,
    SelectionFull,
    NotPlayable,
    GameOver,
}

/// Result of `TileManager::select`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectResult {
    Selected,
    Rejected(SelectionRejection),
}

impl SelectResult {
    pub fn is_selected(self) -> bool {
        matches!(self, SelectResult::Selected)
    }
}

/// Sink for the signals the engine raises toward the outer layers.
/// Every method defaults to a no-op.
pub trait GameEvents {
    /// A hazard tile reached the bottom row
    fn game_over(&mut self) {}

    /// Called after every hazard scan with whether any fire tile is on the board
    fn hazard_state(&mut self, _hazard_present: bool) {}

    /// A selection attempt was refused; useful for audible feedback
    fn selection_rejected(&mut self, _position: Position, _reason: SelectionRejection) {}
}

/// Event sink that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEvents;

impl GameEvents for NoopEvents {}

/// A tile changing slots
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileMove {
    pub tile_id: Uuid,
    pub from: Position,
    pub to: Position,
}

/// A tile changing category in place
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TileUpgrade {
    pub tile_id: Uuid,
    pub position: Position,
    pub from: TileCategory,
    pub to: TileCategory,
}

/// What a single hazard did during a scan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HazardEvent {
    /// The fire tile is chewing on the tile below it
    Burning {
        tile_id: Uuid,
        position: Position,
        burn_counter: u32,
    },
    /// The fire tile consumed the tile below and the column shifted down
    Advanced {
        tile_id: Uuid,
        consumed: Uuid,
        moves: Vec<TileMove>,
        spawned: Tile,
    },
    /// The fire tile sits on the bottom row
    ReachedBottom { tile_id: Uuid, position: Position },
}

/// Everything a hazard scan did, in order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HazardReport {
    pub events: Vec<HazardEvent>,
    pub game_over: bool,
    pub hazard_present: bool,
}

/// Diff produced by a word submission. Presentation layers replay the
/// phases in order to animate the change; the grid already reflects all
/// of them when this is returned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitOutcome {
    pub word: String,
    pub points: i32,
    /// Tiles cleared by the word, as they were before removal
    pub removed: Vec<Tile>,
    /// Survivors falling into vacated slots
    pub gravity: Vec<TileMove>,
    /// Fresh tiles written into the vacated top rows
    pub spawned: Vec<Tile>,
    pub upgrade: Option<TileUpgrade>,
    pub hazards: HazardReport,
}

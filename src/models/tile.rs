use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::utils::letters::tile_points;

/// Grid coordinate. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Closed set of tile categories
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Hash, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum TileCategory {
    Regular,
    /// Green tile
    BonusLow,
    /// Gold tile
    BonusMid,
    /// Diamond tile
    BonusHigh,
    /// Fire tile
    Hazard,
}

impl TileCategory {
    pub const ALL: [TileCategory; 5] = [
        TileCategory::Regular,
        TileCategory::BonusLow,
        TileCategory::BonusMid,
        TileCategory::BonusHigh,
        TileCategory::Hazard,
    ];

    /// Stable index used by per-category tables
    pub const fn index(self) -> usize {
        match self {
            TileCategory::Regular => 0,
            TileCategory::BonusLow => 1,
            TileCategory::BonusMid => 2,
            TileCategory::BonusHigh => 3,
            TileCategory::Hazard => 4,
        }
    }

    pub fn is_bonus(self) -> bool {
        matches!(
            self,
            TileCategory::BonusLow | TileCategory::BonusMid | TileCategory::BonusHigh
        )
    }

    pub fn is_hazard(self) -> bool {
        self == TileCategory::Hazard
    }
}

impl fmt::Display for TileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TileCategory::Regular => "regular",
            TileCategory::BonusLow => "green",
            TileCategory::BonusMid => "gold",
            TileCategory::BonusHigh => "diamond",
            TileCategory::Hazard => "fire",
        };
        f.write_str(name)
    }
}

/// A single letter tile on the board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tile {
    /// Stable identity, survives gravity and hazard moves
    pub id: Uuid,
    /// Glyph shown on the tile. "Qu" is one tile.
    pub letter: String,
    pub category: TileCategory,
    pub is_selected: bool,
    pub points: i32,
    pub is_marked_for_removal: bool,
    pub position: Position,
    /// Empty-slot marker that only exists between gravity and refill
    pub is_placeholder: bool,
    /// Ticks a hazard tile has spent chewing on the tile below it
    #[serde(default)]
    pub burn_counter: u32,
}

impl Tile {
    /// Create a tile for `letter`, deriving its points from the letter table
    pub fn new(id: Uuid, letter: &str, category: TileCategory, position: Position) -> Self {
        Self {
            id,
            letter: letter.to_string(),
            category,
            is_selected: false,
            points: tile_points(letter),
            is_marked_for_removal: false,
            position,
            is_placeholder: false,
            burn_counter: 0,
        }
    }

    /// Create an empty-slot marker for `position`
    pub fn placeholder(position: Position) -> Self {
        Self {
            id: Uuid::nil(),
            letter: String::new(),
            category: TileCategory::Regular,
            is_selected: false,
            points: 0,
            is_marked_for_removal: false,
            position,
            is_placeholder: true,
            burn_counter: 0,
        }
    }

    pub fn is_hazard(&self) -> bool {
        self.category.is_hazard() && !self.is_placeholder
    }

    /// A tile the player may put into a selection
    pub fn is_playable(&self) -> bool {
        !self.is_placeholder && !self.is_marked_for_removal
    }
}

use serde::{Deserialize, Serialize};

use crate::{
    error::{EngineError, Result},
    game::mode::GameMode,
    models::TileCategory,
    utils::letters::{base_frequencies, ALPHABET_SIZE, LETTERS},
};

/// Default board edge length
pub const DEFAULT_GRID_SIZE: usize = 7;
/// Hard cap on the selection path length
pub const DEFAULT_MAX_SELECTION: usize = 16;

/// One value per tile category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CategoryTable<T> {
    values: [T; 5],
}

impl<T: Copy> CategoryTable<T> {
    pub fn new(regular: T, bonus_low: T, bonus_mid: T, bonus_high: T, hazard: T) -> Self {
        Self {
            values: [regular, bonus_low, bonus_mid, bonus_high, hazard],
        }
    }

    pub fn get(&self, category: TileCategory) -> T {
        self.values[category.index()]
    }

    pub fn set(&mut self, category: TileCategory, value: T) {
        self.values[category.index()] = value;
    }
}

/// Score multiplier per category
pub type MultiplierTable = CategoryTable<f64>;

/// Burn resistance per category. Hazard tiles are never consumed, so their
/// entry is unused.
pub type BreakPointTable = CategoryTable<u32>;

impl Default for MultiplierTable {
    fn default() -> Self {
        Self::new(1.0, 1.5, 2.0, 3.0, 1.0)
    }
}

impl Default for BreakPointTable {
    fn default() -> Self {
        Self::new(1, 2, 3, 4, u32::MAX)
    }
}

/// Construction parameters for a new game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EngineConfig {
    pub rows: usize,
    pub columns: usize,
    pub max_selection: usize,
    /// Base letter frequencies, alphabetical, expected to sum to ~100
    pub letter_frequencies: Vec<f64>,
    pub break_points: BreakPointTable,
    pub multipliers: MultiplierTable,
    pub mode: GameMode,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_SIZE,
            columns: DEFAULT_GRID_SIZE,
            max_selection: DEFAULT_MAX_SELECTION,
            letter_frequencies: base_frequencies(),
            break_points: BreakPointTable::default(),
            multipliers: MultiplierTable::default(),
            mode: GameMode::Arcade,
        }
    }
}

impl EngineConfig {
    /// Check the construction preconditions
    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(EngineError::InvalidGridSize {
                rows: self.rows,
                columns: self.columns,
            });
        }

        if self.max_selection == 0 {
            return Err(EngineError::InvalidSelectionCap);
        }

        if self.letter_frequencies.len() != ALPHABET_SIZE {
            return Err(EngineError::FrequencyTableLength(
                self.letter_frequencies.len(),
            ));
        }

        for (index, value) in self.letter_frequencies.iter().enumerate() {
            if !value.is_finite() || *value <= 0.0 {
                return Err(EngineError::InvalidFrequency {
                    letter: LETTERS[index],
                    value: *value,
                });
            }
        }

        Ok(())
    }
}

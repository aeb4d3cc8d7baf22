use std::sync::Arc;

use crate::{
    dictionary::Dictionary,
    error::{EngineError, Result},
    game::{rules::MultiplierTable, scorer::Scorer},
    models::Tile,
};

/// Validates and scores selected tile paths
#[derive(Debug, Clone)]
pub struct WordChecker {
    dictionary: Arc<Dictionary>,
}

impl WordChecker {
    pub fn new(dictionary: Arc<Dictionary>) -> Result<Self> {
        if dictionary.is_empty() {
            return Err(EngineError::EmptyDictionary);
        }
        Ok(Self { dictionary })
    }

    /// Extract the word spelled by the tiles. "Qu" tiles stay whole.
    pub fn word(tiles: &[Tile]) -> String {
        tiles.iter().map(|tile| tile.letter.as_str()).collect()
    }

    /// Check if the tiles spell a dictionary word
    pub fn is_valid(&self, tiles: &[Tile]) -> bool {
        if tiles.is_empty() || tiles.iter().any(|tile| tile.is_placeholder) {
            return false;
        }
        self.dictionary.contains(&Self::word(tiles))
    }

    pub fn definition(&self, tiles: &[Tile]) -> Option<&str> {
        self.dictionary.definition(&Self::word(tiles))
    }

    pub fn score(tiles: &[Tile], multipliers: &MultiplierTable) -> i32 {
        Scorer::calculate_score(tiles, multipliers)
    }

    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dictionary
    }
}

use crate::{game::rules::MultiplierTable, models::Tile};

pub struct Scorer;

impl Scorer {
    /// Calculate the score for a selected path of tiles.
    ///
    /// Scoring rules:
    /// - Each tile contributes its base points
    /// - The whole sum is multiplied once by the highest category
    ///   multiplier among the tiles (one diamond makes the word 3x)
    /// - The result is truncated to an integer
    pub fn calculate_score(tiles: &[Tile], multipliers: &MultiplierTable) -> i32 {
        let base: i32 = tiles.iter().map(|tile| tile.points).sum();
        (base as f64 * Self::highest_multiplier(tiles, multipliers)) as i32
    }

    /// Largest multiplier among the tiles' categories, 1.0 for an empty path
    pub fn highest_multiplier(tiles: &[Tile], multipliers: &MultiplierTable) -> f64 {
        tiles
            .iter()
            .map(|tile| multipliers.get(tile.category))
            .fold(None, |best: Option<f64>, m| Some(best.map_or(m, |b| b.max(m))))
            .unwrap_or(1.0)
    }
}

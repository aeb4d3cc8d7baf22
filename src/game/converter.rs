use rand::{seq::IndexedRandom, Rng};

use crate::{
    game::{events::TileUpgrade, grid::Grid},
    models::{Position, TileCategory},
};

/// Word length needed for a diamond upgrade
pub const HIGH_UPGRADE_LENGTH: usize = 6;
/// Word score needed for a diamond upgrade
pub const HIGH_UPGRADE_POINTS: i32 = 2000;
/// Word length needed for a gold upgrade
pub const MID_UPGRADE_LENGTH: usize = 5;
/// Word score needed for a gold upgrade
pub const MID_UPGRADE_POINTS: i32 = 1000;

/// Promotes one board tile after a strong word
pub struct TileConverter;

impl TileConverter {
    /// Category earned by a word. `Regular` means no upgrade.
    pub fn upgrade_category(word_length: usize, points: i32) -> TileCategory {
        if word_length >= HIGH_UPGRADE_LENGTH && points >= HIGH_UPGRADE_POINTS {
            TileCategory::BonusHigh
        } else if word_length >= MID_UPGRADE_LENGTH && points >= MID_UPGRADE_POINTS {
            TileCategory::BonusMid
        } else {
            TileCategory::Regular
        }
    }

    /// Pick a random tile that is not already a bonus tile. Fire tiles
    /// are eligible.
    pub fn pick_upgrade_target(grid: &Grid, rng: &mut impl Rng) -> Option<Position> {
        let eligible: Vec<Position> = grid
            .tiles()
            .filter(|tile| !tile.is_placeholder && !tile.category.is_bonus())
            .map(|tile| tile.position)
            .collect();

        eligible.choose(rng).copied()
    }

    /// Upgrade one tile in place if the word earned it
    pub fn apply_upgrade(
        word: &str,
        points: i32,
        grid: &mut Grid,
        rng: &mut impl Rng,
    ) -> Option<TileUpgrade> {
        let category = Self::upgrade_category(word.chars().count(), points);
        if category == TileCategory::Regular {
            return None;
        }

        let position = Self::pick_upgrade_target(grid, rng)?;
        let tile = grid.get_mut(position)?;
        let upgrade = TileUpgrade {
            tile_id: tile.id,
            position,
            from: tile.category,
            to: category,
        };

        tile.category = category;
        tile.burn_counter = 0;

        tracing::debug!(
            "'{}' upgraded {} at {} from {} to {}",
            word,
            tile.letter,
            position,
            upgrade.from,
            upgrade.to
        );

        Some(upgrade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::fixtures::lettered_grid;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_upgrade_thresholds() {
        assert_eq!(TileConverter::upgrade_category(6, 2000), TileCategory::BonusHigh);
        assert_eq!(TileConverter::upgrade_category(6, 1999), TileCategory::BonusMid);
        assert_eq!(TileConverter::upgrade_category(5, 1000), TileCategory::BonusMid);
        assert_eq!(TileConverter::upgrade_category(5, 999), TileCategory::Regular);
        assert_eq!(TileConverter::upgrade_category(4, 5000), TileCategory::Regular);
    }

    #[test]
    fn test_weak_word_changes_nothing() {
        let mut grid = lettered_grid(4, 4);
        let before = grid.clone();
        let mut rng = StdRng::seed_from_u64(8);

        assert!(TileConverter::apply_upgrade("cat", 300, &mut grid, &mut rng).is_none());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_upgrade_keeps_letter_points_and_position() {
        let mut grid = lettered_grid(4, 4);
        let before = grid.clone();
        let mut rng = StdRng::seed_from_u64(9);

        let upgrade = TileConverter::apply_upgrade("blazing", 2500, &mut grid, &mut rng)
            .expect("strong word should upgrade a tile");

        let old = before.get(upgrade.position).unwrap();
        let new = grid.get(upgrade.position).unwrap();
        assert_eq!(new.category, TileCategory::BonusHigh);
        assert_eq!(new.letter, old.letter);
        assert_eq!(new.points, old.points);
        assert_eq!(new.id, old.id);
        assert_eq!(new.position, upgrade.position);
    }

    #[test]
    fn test_no_target_when_board_is_all_bonus() {
        let mut grid = lettered_grid(2, 2);
        for tile in grid.tiles_mut() {
            tile.category = TileCategory::BonusLow;
        }
        let mut rng = StdRng::seed_from_u64(10);

        assert_eq!(TileConverter::pick_upgrade_target(&grid, &mut rng), None);
        assert!(TileConverter::apply_upgrade("blazing", 2500, &mut grid, &mut rng).is_none());
    }

    #[test]
    fn test_only_hazard_and_regular_tiles_are_targets() {
        let mut grid = lettered_grid(2, 2);
        let categories = [
            TileCategory::BonusLow,
            TileCategory::BonusMid,
            TileCategory::BonusHigh,
            TileCategory::Hazard,
        ];
        for (tile, category) in grid.tiles_mut().zip(categories) {
            tile.category = category;
            tile.burn_counter = 1;
        }
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..20 {
            assert_eq!(
                TileConverter::pick_upgrade_target(&grid, &mut rng),
                Some(Position::new(1, 1))
            );
        }

        let upgrade = TileConverter::apply_upgrade("flames", 1200, &mut grid, &mut rng).unwrap();
        assert_eq!(upgrade.from, TileCategory::Hazard);
        assert_eq!(upgrade.to, TileCategory::BonusMid);
        assert_eq!(grid.get(Position::new(1, 1)).unwrap().burn_counter, 0);
    }
}

use rand::Rng;
use uuid::{Builder, Uuid};

use crate::{
    game::{
        letters::LetterGenerator, performance::PerformanceEvaluator,
        tile_types::TileTypeGenerator,
    },
    models::{Position, Tile, TileCategory},
};

/// The word that triggered a refill, used to bias the new categories
#[derive(Debug, Clone, Copy)]
pub struct RefillContext<'a> {
    pub word: &'a str,
    pub points: i32,
    pub level: u32,
    pub streak: &'a PerformanceEvaluator,
}

/// Tile identifier drawn from the game RNG so seeded runs repeat exactly
pub fn new_tile_id(rng: &mut impl Rng) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    Builder::from_random_bytes(bytes).into_uuid()
}

/// Build one fresh tile for `position`
pub fn generate_tile(
    letters: &mut LetterGenerator,
    category: TileCategory,
    position: Position,
    weighted: bool,
    rng: &mut impl Rng,
) -> Tile {
    let letter = letters.draw(weighted, rng);
    let id = new_tile_id(rng);
    Tile::new(id, letter, category, position)
}

/// Build replacement tiles for `positions`, one per slot and in the same
/// order, with categories chosen from the word that was just played
pub fn generate_refill(
    letters: &mut LetterGenerator,
    types: &TileTypeGenerator,
    context: RefillContext<'_>,
    positions: &[Position],
    rng: &mut impl Rng,
) -> Vec<Tile> {
    let categories = types.generate_types(
        context.word,
        context.points,
        context.level,
        positions.len(),
        context.streak,
        rng,
    );

    positions
        .iter()
        .zip(categories)
        .map(|(position, category)| generate_tile(letters, category, *position, true, rng))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{game::mode::GameMode, utils::letters::base_frequencies};
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_tile_ids_are_reproducible() {
        let mut first = StdRng::seed_from_u64(11);
        let mut second = StdRng::seed_from_u64(11);
        assert_eq!(new_tile_id(&mut first), new_tile_id(&mut second));
        assert_ne!(new_tile_id(&mut first), new_tile_id(&mut first));
    }

    #[test]
    fn test_refill_fills_each_position() {
        let mut letters = LetterGenerator::new(base_frequencies());
        let types = TileTypeGenerator::new(GameMode::Arcade);
        let streak = PerformanceEvaluator::new();
        let mut rng = StdRng::seed_from_u64(12);
        let positions = vec![Position::new(0, 0), Position::new(0, 3), Position::new(1, 3)];

        let context = RefillContext {
            word: "blaze",
            points: 1500,
            level: 1,
            streak: &streak,
        };
        let tiles = generate_refill(&mut letters, &types, context, &positions, &mut rng);

        assert_eq!(tiles.len(), 3);
        for (tile, position) in tiles.iter().zip(&positions) {
            assert_eq!(tile.position, *position);
            assert!(!tile.is_placeholder);
            assert!(tile.points > 0);
        }
        assert_eq!(
            tiles
                .iter()
                .filter(|t| t.category == TileCategory::BonusLow)
                .count(),
            1
        );
        // Refills are weighted draws
        assert_ne!(letters.current_probabilities(), letters.base_probabilities());
    }
}

use rand::{seq::SliceRandom, Rng};

use crate::{
    game::{mode::GameMode, performance::PerformanceEvaluator},
    models::TileCategory,
};

/// Minimum word length that can earn a bonus tile
pub const BONUS_MIN_WORD_LENGTH: usize = 4;
/// Minimum word score that can earn a bonus tile
pub const BONUS_MIN_POINTS: i32 = 500;
/// Level at which the bonus probability has doubled
pub const BONUS_LEVEL_SCALE: f64 = 30.0;
/// Hazard probability grows by 1/50 per level
pub const HAZARD_LEVEL_SCALE: f64 = 50.0;
/// Hazard probability never exceeds this before the streak boost
pub const HAZARD_CAP: f64 = 0.5;
/// Hazard boost applied while the player is on a hot streak
pub const HOT_STREAK_HAZARD_BOOST: f64 = 1.5;

/// Chooses categories for freshly generated tiles
#[derive(Debug, Clone)]
pub struct TileTypeGenerator {
    mode: GameMode,
}

impl TileTypeGenerator {
    pub fn new(mode: GameMode) -> Self {
        Self { mode }
    }

    /// Total bonus mass for a refill. A qualifying word guarantees at least
    /// one green tile; higher levels add more.
    pub fn bonus_probability(word: &str, points: i32, level: u32) -> f64 {
        let base = if word.chars().count() >= BONUS_MIN_WORD_LENGTH && points >= BONUS_MIN_POINTS {
            1.0
        } else {
            0.0
        };
        let level_ratio = level as f64 / BONUS_LEVEL_SCALE;
        base * (1.0 + level_ratio * level_ratio)
    }

    /// Total hazard mass for a refill. A cold streak does not lower it.
    pub fn hazard_probability(&self, level: u32, streak: &PerformanceEvaluator) -> f64 {
        if !self.mode.spawns_hazards() {
            return 0.0;
        }

        let base = (level as f64 / HAZARD_LEVEL_SCALE).min(HAZARD_CAP);
        if streak.is_hot_streak() {
            base * HOT_STREAK_HAZARD_BOOST
        } else {
            base
        }
    }

    /// Spread `total` across `count` slots, each slot taking at most 1.0
    fn allocate(total: f64, count: usize) -> Vec<f64> {
        let mut remaining = total.max(0.0);
        (0..count)
            .map(|_| {
                let slot = remaining.min(1.0);
                remaining -= slot;
                slot
            })
            .collect()
    }

    /// Produce exactly `count` categories for a refill, in random order.
    ///
    /// Each slot rolls once: below its bonus share it becomes green, else
    /// below its hazard share it becomes fire. Both shares are compared
    /// against the same roll.
    pub fn generate_types(
        &self,
        word: &str,
        points: i32,
        level: u32,
        count: usize,
        streak: &PerformanceEvaluator,
        rng: &mut impl Rng,
    ) -> Vec<TileCategory> {
        let bonus = Self::allocate(Self::bonus_probability(word, points, level), count);
        let hazard = Self::allocate(self.hazard_probability(level, streak), count);

        let mut categories: Vec<TileCategory> = bonus
            .iter()
            .zip(hazard.iter())
            .map(|(bonus_chance, hazard_chance)| {
                let roll = rng.random::<f64>();
                if roll < *bonus_chance {
                    TileCategory::BonusLow
                } else if roll < *hazard_chance {
                    TileCategory::Hazard
                } else {
                    TileCategory::Regular
                }
            })
            .collect();

        categories.shuffle(rng);
        categories
    }
}

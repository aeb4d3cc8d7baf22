use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    error::{EngineError, Result},
    utils::letters::{reduction_percentage, ALPHABET_SIZE, LETTERS, QU_GLYPH},
};

/// Every letter keeps at least this much weight so it stays drawable
pub const MIN_PROBABILITY: f64 = 0.01;
/// The current vector is renormalized to this total after each rebalance
pub const PROBABILITY_TOTAL: f64 = 100.0;
/// Number of lowest-weight letters that receive the mass taken from a draw
pub const REDISTRIBUTION_TARGETS: usize = 6;
/// Allowed drift of a restored vector's total
pub const TOTAL_TOLERANCE: f64 = 0.01;
/// One in this many Q draws becomes a "Qu" tile
pub const QU_ODDS: u32 = 3;

const Q_INDEX: usize = 16;

/// Letter sampler with a self-rebalancing frequency table.
///
/// Weighted draws push probability away from the letter just drawn and
/// toward the rarest letters, which keeps boards from filling up with
/// repeats without ever making a letter impossible.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LetterGenerator {
    base: Vec<f64>,
    current: Vec<f64>,
}

impl LetterGenerator {
    /// `base` holds one weight per letter in alphabetical order
    pub fn new(base: Vec<f64>) -> Self {
        Self {
            current: base.clone(),
            base,
        }
    }

    /// Draw one tile glyph. Returns "Qu" as a single glyph when the Q
    /// branch rolls it.
    pub fn draw(&mut self, weighted: bool, rng: &mut impl Rng) -> &'static str {
        let index = self.sample_index(rng);

        let glyph = if index == Q_INDEX && rng.random_range(0..QU_ODDS) == 0 {
            QU_GLYPH
        } else {
            LETTERS[index]
        };

        if weighted {
            self.rebalance(index);
        }

        glyph
    }

    fn sample_index(&self, rng: &mut impl Rng) -> usize {
        let total: f64 = self.current.iter().sum();
        let random_value = rng.random::<f64>() * total;

        let mut cumulative = 0.0;
        for (index, weight) in self.current.iter().enumerate() {
            cumulative += weight;
            if random_value < cumulative {
                return index;
            }
        }

        tracing::warn!(
            "Letter search fell through (value {} of total {}), using A",
            random_value,
            total
        );
        0 // Fallback
    }

    fn rebalance(&mut self, drawn: usize) {
        let removed = self.current[drawn] * reduction_percentage(drawn) / 100.0;
        self.current[drawn] -= removed;

        let mut lowest: Vec<usize> = (0..self.current.len()).filter(|i| *i != drawn).collect();
        lowest.sort_by(|a, b| self.current[*a].total_cmp(&self.current[*b]));
        lowest.truncate(REDISTRIBUTION_TARGETS);

        if !lowest.is_empty() {
            let share = removed / lowest.len() as f64;
            for index in lowest {
                self.current[index] += share;
            }
        }

        for weight in self.current.iter_mut() {
            *weight = weight.max(MIN_PROBABILITY);
        }

        self.normalize();
    }

    /// Scale the mass above the floor so the vector sums to the target and
    /// no entry drops under the floor.
    fn normalize(&mut self) {
        let len = self.current.len() as f64;
        let free_target = PROBABILITY_TOTAL - MIN_PROBABILITY * len;
        let free: f64 = self.current.iter().map(|w| w - MIN_PROBABILITY).sum();

        if free <= 0.0 {
            let even = PROBABILITY_TOTAL / len;
            self.current.iter_mut().for_each(|w| *w = even);
            return;
        }

        let scale = free_target / free;
        for weight in self.current.iter_mut() {
            *weight = MIN_PROBABILITY + (*weight - MIN_PROBABILITY) * scale;
        }
    }

    /// Restore the base distribution
    pub fn reset_probabilities(&mut self) {
        self.current.clone_from(&self.base);
    }

    pub fn current_probabilities(&self) -> &[f64] {
        &self.current
    }

    pub fn base_probabilities(&self) -> &[f64] {
        &self.base
    }

    /// Replace the current vector, e.g. when resuming a saved session
    pub fn restore_probabilities(&mut self, probabilities: Vec<f64>) -> Result<()> {
        if probabilities.len() != ALPHABET_SIZE {
            return Err(EngineError::CorruptSnapshot(format!(
                "expected {} letter probabilities, found {}",
                ALPHABET_SIZE,
                probabilities.len()
            )));
        }

        for (index, weight) in probabilities.iter().enumerate() {
            let floor = MIN_PROBABILITY.min(self.base[index]);
            if !weight.is_finite() || *weight < floor {
                return Err(EngineError::CorruptSnapshot(format!(
                    "probability for {} is {}, below the floor of {}",
                    LETTERS[index], weight, floor
                )));
            }
        }

        // An undrawn table still sums to whatever the base table sums to
        let total: f64 = probabilities.iter().sum();
        let base_total: f64 = self.base.iter().sum();
        if (total - PROBABILITY_TOTAL).abs() > TOTAL_TOLERANCE
            && (total - base_total).abs() > TOTAL_TOLERANCE
        {
            return Err(EngineError::CorruptSnapshot(format!(
                "letter probabilities sum to {}, expected {}",
                total, PROBABILITY_TOTAL
            )));
        }

        self.current = probabilities;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::letters::base_frequencies;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_probability_conservation() {
        let mut generator = LetterGenerator::new(base_frequencies());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..2_000 {
            generator.draw(true, &mut rng);
        }

        let total: f64 = generator.current_probabilities().iter().sum();
        assert!((total - 100.0).abs() < 1e-6, "Probabilities sum to {}", total);
        assert!(generator
            .current_probabilities()
            .iter()
            .all(|p| *p >= MIN_PROBABILITY - 1e-12));
    }

    #[test]
    fn test_weighted_draw_lowers_drawn_letter() {
        let mut generator = LetterGenerator::new(base_frequencies());
        let mut rng = StdRng::seed_from_u64(7);

        let glyph = generator.draw(true, &mut rng);
        let index = LETTERS
            .iter()
            .position(|l| glyph.starts_with(l))
            .unwrap();

        assert!(
            generator.current_probabilities()[index] < generator.base_probabilities()[index],
            "Drawn letter {} should lose weight",
            glyph
        );
    }

    #[test]
    fn test_unweighted_draw_leaves_table_alone() {
        let mut generator = LetterGenerator::new(base_frequencies());
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            generator.draw(false, &mut rng);
        }

        assert_eq!(
            generator.current_probabilities(),
            generator.base_probabilities()
        );
    }

    #[test]
    fn test_reset_restores_exact_base() {
        let mut generator = LetterGenerator::new(base_frequencies());
        let mut rng = StdRng::seed_from_u64(99);

        for _ in 0..500 {
            generator.draw(true, &mut rng);
        }
        assert_ne!(
            generator.current_probabilities(),
            generator.base_probabilities()
        );

        generator.reset_probabilities();
        assert_eq!(generator.current_probabilities(), &base_frequencies()[..]);

        generator.reset_probabilities();
        assert_eq!(generator.current_probabilities(), &base_frequencies()[..]);
    }

    #[test]
    fn test_q_sometimes_becomes_qu() {
        let mut only_q = vec![0.01; ALPHABET_SIZE];
        only_q[Q_INDEX] = 99.75;
        let mut generator = LetterGenerator::new(only_q);
        let mut rng = StdRng::seed_from_u64(1234);

        let draws: Vec<&str> = (0..600).map(|_| generator.draw(false, &mut rng)).collect();
        let qu = draws.iter().filter(|g| **g == QU_GLYPH).count();
        let q = draws.iter().filter(|g| **g == "Q").count();

        assert!(qu > 0 && q > 0);
        let ratio = qu as f64 / (qu + q) as f64;
        assert!(ratio > 0.2 && ratio < 0.45, "Qu ratio was {}", ratio);
    }

    #[test]
    fn test_search_failure_falls_back_to_a() {
        let mut generator = LetterGenerator::new(base_frequencies());
        generator.current = vec![f64::NAN; ALPHABET_SIZE];
        let mut rng = StdRng::seed_from_u64(5);

        assert_eq!(generator.draw(false, &mut rng), "A");
    }

    #[test]
    fn test_restore_rejects_wrong_length() {
        let mut generator = LetterGenerator::new(base_frequencies());
        assert!(generator.restore_probabilities(vec![1.0; 3]).is_err());
        assert!(generator.restore_probabilities(vec![100.0 / 26.0; 26]).is_ok());
    }

    #[test]
    fn test_restore_rejects_broken_weights() {
        let mut generator = LetterGenerator::new(base_frequencies());

        let mut poisoned = vec![100.0 / 26.0; ALPHABET_SIZE];
        poisoned[0] = f64::NAN;
        assert!(matches!(
            generator.restore_probabilities(poisoned),
            Err(EngineError::CorruptSnapshot(_))
        ));

        let mut negative = vec![100.0 / 26.0; ALPHABET_SIZE];
        negative[1] = -5.0;
        negative[2] += 5.0;
        assert!(generator.restore_probabilities(negative).is_err());

        let mut under_floor = vec![100.0 / 26.0; ALPHABET_SIZE];
        under_floor[3] = MIN_PROBABILITY / 2.0;
        assert!(generator.restore_probabilities(under_floor).is_err());

        assert!(generator.restore_probabilities(vec![1.0; ALPHABET_SIZE]).is_err());

        // Nothing was overwritten by the failed attempts
        assert_eq!(generator.current_probabilities(), generator.base_probabilities());
    }

    #[test]
    fn test_restore_accepts_drawn_and_undrawn_tables() {
        let mut generator = LetterGenerator::new(base_frequencies());
        let untouched = generator.current_probabilities().to_vec();
        assert!(generator.restore_probabilities(untouched).is_ok());

        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..200 {
            generator.draw(true, &mut rng);
        }
        let drawn = generator.current_probabilities().to_vec();

        let mut resumed = LetterGenerator::new(base_frequencies());
        resumed.restore_probabilities(drawn.clone()).unwrap();
        assert_eq!(resumed.current_probabilities(), drawn.as_slice());
        assert!(resumed.current_probabilities().iter().all(|w| *w >= MIN_PROBABILITY));
    }
}

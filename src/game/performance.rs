use serde::{Deserialize, Serialize};

/// Consecutive qualifying words needed to enter a streak
pub const STREAK_THRESHOLD: u32 = 3;
/// Scores above this count toward a hot streak
pub const HOT_SCORE: i32 = 650;
/// Words longer than this count toward a hot streak regardless of score
pub const HOT_WORD_LENGTH: usize = 4;
/// Scores below this count toward a cold streak
pub const COLD_SCORE: i32 = 450;

/// Tracks hot and cold streaks from recent submissions
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PerformanceEvaluator {
    hot: u32,
    cold: u32,
}

impl PerformanceEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore saved counters
    pub fn with_counters(hot: u32, cold: u32) -> Self {
        Self { hot, cold }
    }

    /// Update the streak counters with a submitted word
    pub fn record_word(&mut self, word: &str, score: i32) {
        if score > HOT_SCORE || word.chars().count() > HOT_WORD_LENGTH {
            self.hot += 1;
            self.cold = 0;
        } else if score < COLD_SCORE {
            self.hot = 0;
            self.cold += 1;
        } else {
            // Middling words break both streaks
            self.hot = 0;
            self.cold = 0;
        }

        tracing::trace!(
            "Recorded '{}' ({} pts): hot={}, cold={}",
            word,
            score,
            self.hot,
            self.cold
        );
    }

    pub fn is_hot_streak(&self) -> bool {
        self.hot >= STREAK_THRESHOLD
    }

    pub fn is_cold_streak(&self) -> bool {
        self.cold >= STREAK_THRESHOLD
    }

    pub fn hot_count(&self) -> u32 {
        self.hot
    }

    pub fn cold_count(&self) -> u32 {
        self.cold
    }

    pub fn reset(&mut self) {
        self.hot = 0;
        self.cold = 0;
    }
}

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Number of letters in the alphabet the generator draws from
pub const ALPHABET_SIZE: usize = 26;

/// Glyph used for the combined Q+U tile
pub const QU_GLYPH: &str = "Qu";

/// Tile points are the classic letter value scaled by this factor
pub const POINTS_PER_VALUE: i32 = 100;

/// Letter glyphs in alphabetical order, indexed like every table below
pub static LETTERS: [&str; ALPHABET_SIZE] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

/// Letter values similar to Scrabble scoring
pub static LETTER_VALUES: Lazy<HashMap<char, u8>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // 1 point letters
    for ch in ['A', 'E', 'I', 'O', 'U', 'L', 'N', 'R', 'S', 'T'] {
        map.insert(ch, 1);
    }

    // 2 points
    for ch in ['D', 'G'] {
        map.insert(ch, 2);
    }

    // 3 points
    for ch in ['B', 'C', 'M', 'P'] {
        map.insert(ch, 3);
    }

    // 4 points
    for ch in ['F', 'H', 'V', 'W', 'Y'] {
        map.insert(ch, 4);
    }

    // 5 points
    map.insert('K', 5);

    // 8 points
    for ch in ['J', 'X'] {
        map.insert(ch, 8);
    }

    // 10 points
    for ch in ['Q', 'Z'] {
        map.insert(ch, 10);
    }

    map
});

/// Letter frequency distribution for English, alphabetical, sums to ~100
pub static LETTER_DISTRIBUTION: Lazy<Vec<(char, f64)>> = Lazy::new(|| {
    vec![
        ('A', 8.167),
        ('B', 1.492),
        ('C', 2.782),
        ('D', 4.253),
        ('E', 12.702),
        ('F', 2.228),
        ('G', 2.015),
        ('H', 6.094),
        ('I', 6.966),
        ('J', 0.153),
        ('K', 0.772),
        ('L', 4.025),
        ('M', 2.406),
        ('N', 6.749),
        ('O', 7.507),
        ('P', 1.929),
        ('Q', 0.095),
        ('R', 5.987),
        ('S', 6.327),
        ('T', 9.056),
        ('U', 2.758),
        ('V', 0.978),
        ('W', 2.360),
        ('X', 0.150),
        ('Y', 1.974),
        ('Z', 0.074),
    ]
});

/// Percentage of a letter's current weight removed each time it is drawn.
/// Common letters lose less so they stay common; rare letters back off hard
/// so a second J or Z right after the first is unlikely.
pub static REDUCTION_PERCENTAGES: Lazy<HashMap<char, f64>> = Lazy::new(|| {
    let mut map = HashMap::new();

    for ch in ['E', 'T', 'A'] {
        map.insert(ch, 10.0);
    }

    for ch in ['O', 'I', 'N', 'S', 'R', 'H'] {
        map.insert(ch, 15.0);
    }

    for ch in ['D', 'L', 'U', 'C', 'M'] {
        map.insert(ch, 20.0);
    }

    for ch in ['W', 'F', 'G', 'Y', 'P', 'B'] {
        map.insert(ch, 30.0);
    }

    for ch in ['V', 'K'] {
        map.insert(ch, 40.0);
    }

    for ch in ['J', 'X', 'Q', 'Z'] {
        map.insert(ch, 50.0);
    }

    map
});

/// Base frequency vector in alphabetical order
pub fn base_frequencies() -> Vec<f64> {
    LETTER_DISTRIBUTION.iter().map(|(_, freq)| *freq).collect()
}

/// Reduction percentage for the letter at `index` in alphabetical order
pub fn reduction_percentage(index: usize) -> f64 {
    LETTER_DISTRIBUTION
        .get(index)
        .and_then(|(ch, _)| REDUCTION_PERCENTAGES.get(ch))
        .copied()
        .unwrap_or(20.0)
}

/// Get the point value for a letter
pub fn get_letter_value(letter: char) -> u8 {
    let upper = letter.to_ascii_uppercase();
    *LETTER_VALUES.get(&upper).unwrap_or(&1)
}

/// Tile points for a glyph. Multi-character glyphs such as "Qu" are worth
/// the sum of their letters.
pub fn tile_points(glyph: &str) -> i32 {
    glyph
        .chars()
        .map(|ch| get_letter_value(ch) as i32 * POINTS_PER_VALUE)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_values() {
        assert_eq!(get_letter_value('E'), 1);
        assert_eq!(get_letter_value('q'), 10);
        assert_eq!(get_letter_value('X'), 8);
        assert_eq!(get_letter_value('D'), 2);
    }

    #[test]
    fn test_distribution_is_alphabetical_and_complete() {
        assert_eq!(LETTER_DISTRIBUTION.len(), ALPHABET_SIZE);
        for (index, (ch, _)) in LETTER_DISTRIBUTION.iter().enumerate() {
            assert_eq!(LETTERS[index], ch.to_string());
        }
        let total: f64 = base_frequencies().iter().sum();
        assert!((total - 100.0).abs() < 0.1, "Base table sums to {}", total);
    }

    #[test]
    fn test_every_letter_has_reduction() {
        assert_eq!(REDUCTION_PERCENTAGES.len(), ALPHABET_SIZE);
        assert!(reduction_percentage(4) < reduction_percentage(25));
    }

    #[test]
    fn test_tile_points() {
        assert_eq!(tile_points("A"), 100);
        assert_eq!(tile_points("Z"), 1000);
        assert_eq!(tile_points(QU_GLYPH), 1100);
    }
}

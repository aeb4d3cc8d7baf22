use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

/// Word list with optional definitions. Lookups are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashMap<String, Option<String>>,
}

impl Dictionary {
    /// Load dictionary from a file.
    ///
    /// `.json` files hold an object mapping words to definitions. Anything
    /// else is read as one word per line, optionally followed by a tab and
    /// its definition.
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read dictionary {}", path.display()))?;

        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let dictionary = if is_json {
            let entries: HashMap<String, String> = serde_json::from_str(&content)
                .with_context(|| format!("Invalid JSON dictionary {}", path.display()))?;
            Self::from_entries(entries.into_iter().map(|(word, def)| (word, Some(def))))
        } else {
            Self::parse_lines(&content)
        };

        tracing::info!("Loaded {} words into dictionary", dictionary.len());

        Ok(dictionary)
    }

    fn parse_lines(content: &str) -> Self {
        Self::from_entries(content.lines().map(|line| match line.split_once('\t') {
            Some((word, definition)) => {
                let definition = definition.trim();
                let definition = (!definition.is_empty()).then(|| definition.to_string());
                (word.to_string(), definition)
            }
            None => (line.to_string(), None),
        }))
    }

    /// Build from `(word, definition)` pairs
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Option<String>)>,
        S: AsRef<str>,
    {
        let words = entries
            .into_iter()
            .map(|(word, definition)| (word.as_ref().trim().to_uppercase(), definition))
            .filter(|(word, _)| !word.is_empty() && word.chars().count() >= 2)
            .collect();

        Self { words }
    }

    /// Build from bare words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::from_entries(words.into_iter().map(|word| (word, None)))
    }

    /// Create an empty dictionary (for testing)
    pub fn empty() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(&word.to_uppercase())
    }

    /// Definition for a word, when the source had one
    pub fn definition(&self, word: &str) -> Option<&str> {
        self.words
            .get(&word.to_uppercase())
            .and_then(|definition| definition.as_deref())
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dictionary() {
        let dict = Dictionary::empty();
        assert!(dict.is_empty());
        assert!(!dict.contains("TEST"));
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dict = Dictionary::from_words(["Quilt", "ember"]);
        assert!(dict.contains("QUILT"));
        assert!(dict.contains("quilt"));
        assert!(dict.contains("EmBeR"));
        assert!(!dict.contains("ash"));
    }

    #[test]
    fn test_single_letters_are_dropped() {
        let dict = Dictionary::from_words(["a", "an", "  "]);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_parse_lines_with_definitions() {
        let dict = Dictionary::parse_lines("ember\ta glowing coal\nash\n");
        assert_eq!(dict.len(), 2);
        assert_eq!(dict.definition("EMBER"), Some("a glowing coal"));
        assert_eq!(dict.definition("ash"), None);
        assert!(dict.contains("ash"));
    }

    #[test]
    fn test_load_json_file() {
        let path = std::env::temp_dir().join(format!("wordfire-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{"blaze": "a bright flame", "soot": "black powder"}"#).unwrap();

        let dict = tokio_test::block_on(Dictionary::load(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(dict.len(), 2);
        assert_eq!(dict.definition("Blaze"), Some("a bright flame"));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let path = std::env::temp_dir().join(format!("wordfire-missing-{}.txt", uuid::Uuid::new_v4()));
        assert!(tokio_test::block_on(Dictionary::load(&path)).is_err());
    }
}

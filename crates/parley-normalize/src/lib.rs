//! Parley text normalization: lowercasing, punctuation stripping,
//! whitespace tokenization and stop-word removal.
//!
//! Also provides the two text primitives shared with the complexity analyzer:
//! word runs ([`words`]) and sentence pieces ([`sentences`]).
//!
//! This crate has no dependencies on other parley crates. It is a pure text
//! processing utility that produces `Vec<String>`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

/// Stop words dropped by [`normalize`]: articles, conjunctions and common
/// prepositions.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word pattern"));
static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid sentence pattern"));

/// Tokenizer with a configurable stop-word set.
#[derive(Debug, Clone)]
pub struct Normalizer {
    stop_words: HashSet<String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Normalizer::with_stop_words(DEFAULT_STOP_WORDS.iter().copied())
    }
}

impl Normalizer {
    /// Build a normalizer that drops the given words (compared lowercase).
    pub fn with_stop_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Normalizer {
            stop_words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Whether `word` is dropped during normalization.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Normalize `text` into word tokens.
    ///
    /// 1. Converts to lowercase.
    /// 2. Removes every character that is neither a word character nor whitespace.
    /// 3. Splits on whitespace.
    /// 4. Drops stop words.
    ///
    /// # Examples
    ///
    /// ```
    /// use parley_normalize::Normalizer;
    ///
    /// let tokens = Normalizer::default().normalize("Hello, the World!");
    /// assert_eq!(tokens, vec!["hello", "world"]);
    /// ```
    pub fn normalize(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let stripped = PUNCTUATION.replace_all(&lower, "");
        stripped
            .split_whitespace()
            .filter(|w| !self.is_stop_word(w))
            .map(str::to_string)
            .collect()
    }
}

/// Normalize `text` with the default stop-word set.
pub fn normalize(text: &str) -> Vec<String> {
    Normalizer::default().normalize(text)
}

/// All runs of word characters in the lowercased text.
///
/// Unlike [`normalize`], punctuation splits words ("don't" gives "don" and
/// "t") and stop words are kept.
pub fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Split `text` into sentence pieces on runs of `.`, `!` and `?`.
///
/// Pieces are returned exactly as a regex split produces them, so a trailing
/// terminator yields a trailing empty piece and empty text yields one empty
/// piece.
pub fn sentences(text: &str) -> Vec<&str> {
    SENTENCE_END.split(text).collect()
}

/// Number of word runs in `text`.
pub fn word_count(text: &str) -> usize {
    WORD.find_iter(text).count()
}

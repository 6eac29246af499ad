//! Text complexity scoring.
//!
//! A text's complexity is a weighted blend of four statistics, scaled to
//! `0..=100`:
//!
//! | statistic               | weight | normalized by            |
//! |-------------------------|--------|--------------------------|
//! | word count              | 0.3    | 50 words, capped at 1    |
//! | vocabulary diversity    | 0.2    | distinct / total words   |
//! | average sentence length | 0.3    | 20 words                 |
//! | average word length     | 0.2    | 6 characters             |
//!
//! The score maps onto four ordered [`Category`] buckets with boundaries at
//! 20, 50 and 75. The [`coach`] module builds communication-style guidance on
//! top of the same statistics.

use std::collections::HashSet;
use std::fmt;

use parley_normalize::{sentences, word_count, words};
use serde::{Deserialize, Serialize};

pub mod coach;

/// Word and sentence statistics of one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStats {
    /// Number of word runs in the lowercased text.
    pub word_count: usize,
    /// Number of distinct words.
    pub unique_words: usize,
    /// Number of sentence pieces, including empty ones.
    pub sentence_count: usize,
    /// Words summed over all sentence pieces.
    pub sentence_words: usize,
    /// Characters summed over all words.
    pub word_chars: usize,
}

impl TextStats {
    pub fn from_text(text: &str) -> Self {
        let words = words(text);
        let unique_words = words.iter().collect::<HashSet<_>>().len();
        let word_chars = words.iter().map(|w| w.chars().count()).sum();

        let pieces = sentences(text);
        let sentence_words = pieces.iter().map(|s| word_count(s)).sum();

        TextStats {
            word_count: words.len(),
            unique_words,
            sentence_count: pieces.len(),
            sentence_words,
            word_chars,
        }
    }

    /// Distinct words over total words, 0 for a text without words.
    pub fn diversity(&self) -> f64 {
        ratio(self.unique_words, self.word_count)
    }

    /// Average words per sentence piece.
    pub fn avg_sentence_length(&self) -> f64 {
        ratio(self.sentence_words, self.sentence_count)
    }

    /// Average characters per word.
    pub fn avg_word_length(&self) -> f64 {
        ratio(self.word_chars, self.word_count)
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn divide(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Weights and normalizers of the complexity formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityWeights {
    pub word_count: f64,
    pub diversity: f64,
    pub sentence_length: f64,
    pub word_length: f64,
    /// Word count at which the word-count term saturates.
    pub word_count_norm: f64,
    pub sentence_length_norm: f64,
    pub word_length_norm: f64,
}

impl Default for ComplexityWeights {
    fn default() -> Self {
        ComplexityWeights {
            word_count: 0.3,
            diversity: 0.2,
            sentence_length: 0.3,
            word_length: 0.2,
            word_count_norm: 50.0,
            sentence_length_norm: 20.0,
            word_length_norm: 6.0,
        }
    }
}

impl ComplexityWeights {
    /// Complexity score of precomputed statistics, clamped to `0..=100`.
    pub fn score(&self, stats: &TextStats) -> f64 {
        let word_term = divide(stats.word_count as f64, self.word_count_norm).min(1.0);
        let sentence_term = divide(stats.avg_sentence_length(), self.sentence_length_norm);
        let word_length_term = divide(stats.avg_word_length(), self.word_length_norm);

        let blended = self.word_count * word_term
            + self.diversity * stats.diversity()
            + self.sentence_length * sentence_term
            + self.word_length * word_length_term;

        (blended * 100.0).clamp(0.0, 100.0)
    }

    /// The first normalizer that is not a positive finite number, by name.
    pub fn invalid_norm(&self) -> Option<(&'static str, f64)> {
        [
            ("word_count_norm", self.word_count_norm),
            ("sentence_length_norm", self.sentence_length_norm),
            ("word_length_norm", self.word_length_norm),
        ]
        .into_iter()
        .find(|&(_, value)| !(value.is_finite() && value > 0.0))
    }
}

/// Bucketed complexity, ordered from simplest to most complex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Simple,
    Moderate,
    Complex,
    VeryComplex,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Simple => "simple",
            Category::Moderate => "moderate",
            Category::Complex => "complex",
            Category::VeryComplex => "very_complex",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds of the moderate, complex and very complex categories.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryBounds {
    pub moderate: f64,
    pub complex: f64,
    pub very_complex: f64,
}

impl Default for CategoryBounds {
    fn default() -> Self {
        CategoryBounds {
            moderate: 20.0,
            complex: 50.0,
            very_complex: 75.0,
        }
    }
}

impl CategoryBounds {
    /// Step function from score to category. Each bound belongs to the
    /// category above it.
    pub fn categorize(&self, score: f64) -> Category {
        if score < self.moderate {
            Category::Simple
        } else if score < self.complex {
            Category::Moderate
        } else if score < self.very_complex {
            Category::Complex
        } else {
            Category::VeryComplex
        }
    }
}

/// One summarization prompt per category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Suggestions {
    pub simple: String,
    pub moderate: String,
    pub complex: String,
    pub very_complex: String,
}

impl Default for Suggestions {
    fn default() -> Self {
        Suggestions {
            simple: "Your message seems straightforward. Could you highlight the key point?".into(),
            moderate: "That's quite detailed. Could you summarize the main idea?".into(),
            complex: "Wow, that's a lot of information! Could you break down the core message?"
                .into(),
            very_complex:
                "This seems like a comprehensive topic. Could you distill it to its essence?"
                    .into(),
        }
    }
}

impl Suggestions {
    pub fn for_category(&self, category: Category) -> &str {
        match category {
            Category::Simple => &self.simple,
            Category::Moderate => &self.moderate,
            Category::Complex => &self.complex,
            Category::VeryComplex => &self.very_complex,
        }
    }
}

/// Complexity scoring configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Analyzer {
    pub weights: ComplexityWeights,
    pub bounds: CategoryBounds,
    pub suggestions: Suggestions,
}

impl Analyzer {
    pub fn complexity(&self, text: &str) -> f64 {
        self.weights.score(&TextStats::from_text(text))
    }

    pub fn category(&self, score: f64) -> Category {
        self.bounds.categorize(score)
    }

    /// The summarization prompt matching the category of `text`.
    pub fn suggest_summarization(&self, text: &str) -> &str {
        let category = self.category(self.complexity(text));
        self.suggestions.for_category(category)
    }
}

/// Complexity of `text` with the default weights, in `0..=100`.
pub fn complexity(text: &str) -> f64 {
    ComplexityWeights::default().score(&TextStats::from_text(text))
}

/// Category of a score with the default bounds.
pub fn category(score: f64) -> Category {
    CategoryBounds::default().categorize(score)
}

/// Summarization prompt for `text` with the default configuration.
pub fn suggest_summarization(text: &str) -> String {
    Analyzer::default().suggest_summarization(text).to_string()
}

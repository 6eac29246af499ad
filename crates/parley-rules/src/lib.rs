//! Parley rule matching: fuzzy keyword scoring and best-match selection.
//!
//! A [`Rule`] ties a response to a keyword set. Scoring a tokenized message
//! against a rule works in two steps:
//!
//! 1. **Certainty**: count the message tokens that equal, or are similar to,
//!    one of the rule's keywords. Each token counts at most once.
//! 2. **Eligibility**: a rule with required words only scores when every
//!    required word is similar to some token, unless it is a single-response
//!    rule (greetings, farewells), which is always eligible.
//!
//! The score is the matched fraction of the keyword set as a percentage.
//! [`best_match`] picks the highest-scoring rule and reports "no confident
//! match" as `None` so the caller can fall back.

use parley_similarity::{DEFAULT_THRESHOLD, similar};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Score a rule needs before its response is used.
pub const DEFAULT_MIN_CONFIDENCE: u8 = 50;

/// What a rule replies with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// A literal reply.
    Text(String),
    /// The name of a template group; one of its entries is picked at reply time.
    Template(String),
}

/// A keyword pattern tied to a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub response: Response,
    /// Keywords in table order. The first similar keyword claims a token.
    pub keywords: Vec<String>,
    /// Words that must all appear (fuzzily) for the rule to be eligible.
    #[serde(default)]
    pub required_words: Vec<String>,
    /// Eligible regardless of required words.
    #[serde(default)]
    pub single_response: bool,
}

impl Rule {
    /// A rule replying with literal text.
    pub fn text<I, S>(response: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule {
            response: Response::Text(response.into()),
            keywords: keywords.into_iter().map(Into::into).collect(),
            required_words: Vec::new(),
            single_response: false,
        }
    }

    /// A rule replying with a pick from a template group.
    pub fn template<I, S>(group: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Rule {
            response: Response::Template(group.into()),
            ..Rule::text(String::new(), keywords)
        }
    }

    /// Set the required words.
    pub fn requiring<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as a single-response rule.
    pub fn single(mut self) -> Self {
        self.single_response = true;
        self
    }

    /// Whether any message can give this rule a non-zero score.
    ///
    /// A rule without keywords always scores 0. Such a rule is a configuration
    /// defect, not a runtime error: it simply never wins.
    pub fn is_reachable(&self) -> bool {
        !self.keywords.is_empty()
    }

    /// Score this rule against a tokenized message.
    pub fn score<S: AsRef<str>>(&self, tokens: &[S], threshold: f64) -> u8 {
        score(
            tokens,
            &self.keywords,
            &self.required_words,
            self.single_response,
            threshold,
        )
    }
}

/// Matching thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Similarity ratio at which two words count as the same word.
    pub similarity_threshold: f64,
    /// Minimum score for a rule to be used.
    pub min_confidence: u8,
}

impl Default for MatchConfig {
    fn default() -> Self {
        MatchConfig {
            similarity_threshold: DEFAULT_THRESHOLD,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
        }
    }
}

/// Score a tokenized message against a keyword set, 0 to 100.
///
/// Returns 0 when `keywords` is empty, and when `required_words` is not
/// satisfied unless `single_response` is set. Tokens that match more than
/// one keyword count once, and the result is capped at 100 when repeated
/// tokens outnumber the keywords.
///
/// # Examples
///
/// ```
/// use parley_rules::score;
///
/// let keywords = ["sedan".to_string(), "car".to_string()];
/// let required = ["sedan".to_string()];
/// assert_eq!(score(&["want", "sedan"], &keywords, &required, false, 0.6), 50);
/// assert_eq!(score(&["want", "car"], &keywords, &required, false, 0.6), 0);
/// ```
pub fn score<S: AsRef<str>>(
    tokens: &[S],
    keywords: &[String],
    required_words: &[String],
    single_response: bool,
    threshold: f64,
) -> u8 {
    if keywords.is_empty() {
        return 0;
    }

    let certainty = tokens
        .iter()
        .filter(|token| {
            let token = token.as_ref();
            keywords.iter().any(|kw| similar(token, kw, threshold))
        })
        .count();

    let has_required = required_words.iter().all(|word| {
        tokens
            .iter()
            .any(|token| similar(word, token.as_ref(), threshold))
    });

    if !has_required && !single_response {
        return 0;
    }

    let percentage = certainty as f64 / keywords.len() as f64;
    (percentage * 100.0).floor().min(100.0) as u8
}

/// The winning rule for a message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Match<'a> {
    pub rule: &'a Rule,
    /// Position of the rule in its table.
    pub index: usize,
    pub score: u8,
}

/// Score every rule in table order.
pub fn score_all<S: AsRef<str>>(tokens: &[S], rules: &[Rule], threshold: f64) -> Vec<u8> {
    rules.iter().map(|rule| rule.score(tokens, threshold)).collect()
}

/// Pick the highest-scoring rule, or `None` when there is no confident match.
///
/// "No confident match" means the table is empty or the best score is below
/// `config.min_confidence`. Among tied rules the earliest in table order wins;
/// callers should only rely on the winner's score being the maximum.
pub fn best_match<'a, S: AsRef<str>>(
    tokens: &[S],
    rules: &'a [Rule],
    config: &MatchConfig,
) -> Option<Match<'a>> {
    let mut best: Option<Match<'a>> = None;

    for (index, rule) in rules.iter().enumerate() {
        let score = rule.score(tokens, config.similarity_threshold);
        trace!(index, score, "scored rule");
        if best.is_none_or(|b| score > b.score) {
            best = Some(Match { rule, index, score });
        }
    }

    best.filter(|m| m.score >= config.min_confidence)
}

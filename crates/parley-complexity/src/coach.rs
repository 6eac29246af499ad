//! Communication-style analysis and guidance selection.
//!
//! [`StyleInsights`] summarizes how a message is written: its complexity,
//! how long its sentences run and how varied its vocabulary is. Guidance is
//! chosen from an ordered list of [`GuidanceRule`]s; the first rule whose
//! condition holds supplies the advice options. Order matters because several
//! conditions are often true at once.

use serde::{Deserialize, Serialize};

use crate::{Analyzer, Category, TextStats};

/// Placeholder replaced by [`StyleInsights::length_feedback`].
pub const LENGTH_FEEDBACK: &str = "{length_feedback}";
/// Placeholder replaced by [`StyleInsights::vocabulary_feedback`].
pub const VOCABULARY_FEEDBACK: &str = "{vocabulary_feedback}";

/// How a message is written.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleInsights {
    pub score: f64,
    pub category: Category,
    pub avg_sentence_length: f64,
    /// Distinct words over total words.
    pub diversity: f64,
}

impl StyleInsights {
    pub fn from_stats(stats: &TextStats, analyzer: &Analyzer) -> Self {
        let score = analyzer.weights.score(stats);
        StyleInsights {
            score,
            category: analyzer.category(score),
            avg_sentence_length: stats.avg_sentence_length(),
            diversity: stats.diversity(),
        }
    }

    pub fn from_text(text: &str, analyzer: &Analyzer) -> Self {
        StyleInsights::from_stats(&TextStats::from_text(text), analyzer)
    }

    pub fn length_feedback(&self) -> &'static str {
        if self.avg_sentence_length < 10.0 {
            "Your sentences are concise."
        } else if self.avg_sentence_length > 20.0 {
            "Try breaking down long sentences."
        } else {
            "Your sentence length is balanced."
        }
    }

    pub fn vocabulary_feedback(&self) -> &'static str {
        if self.diversity > 0.5 {
            "Great vocabulary diversity!"
        } else if self.diversity < 0.3 {
            "Consider using more varied language."
        } else {
            "Your vocabulary is reasonably diverse."
        }
    }

    /// Substitute the feedback placeholders in an advice template.
    pub fn render(&self, template: &str) -> String {
        template
            .replace(LENGTH_FEEDBACK, self.length_feedback())
            .replace(VOCABULARY_FEEDBACK, self.vocabulary_feedback())
    }
}

/// When a guidance rule applies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceCondition {
    Category(Category),
    AvgSentenceLengthAbove(f64),
    DiversityBelow(f64),
}

impl GuidanceCondition {
    pub fn holds(&self, insights: &StyleInsights) -> bool {
        match *self {
            GuidanceCondition::Category(category) => insights.category == category,
            GuidanceCondition::AvgSentenceLengthAbove(limit) => {
                insights.avg_sentence_length > limit
            }
            GuidanceCondition::DiversityBelow(limit) => insights.diversity < limit,
        }
    }
}

/// A condition and the advice offered when it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuidanceRule {
    pub when: GuidanceCondition,
    pub advice: Vec<String>,
}

/// The first rule whose condition holds, in list order.
pub fn select_guidance<'a>(
    rules: &'a [GuidanceRule],
    insights: &StyleInsights,
) -> Option<&'a GuidanceRule> {
    rules.iter().find(|rule| rule.when.holds(insights))
}

/// Guidance configuration for long messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoachConfig {
    /// Messages with more whitespace-separated words than this get guidance.
    pub min_words: usize,
    /// Complexity above which a framework is suggested.
    pub framework_threshold: f64,
    pub framework_prefix: String,
    pub frameworks: Vec<String>,
    pub rules: Vec<GuidanceRule>,
    /// Used when no rule holds.
    pub default_guidance: String,
}

impl Default for CoachConfig {
    fn default() -> Self {
        CoachConfig {
            min_words: 20,
            framework_threshold: 75.0,
            framework_prefix: "Your message is quite complex.".into(),
            frameworks: strings(&[
                "Consider using the STAR method: Situation, Task, Action, Result",
                "Try the 5W1H framework: Who, What, When, Where, Why, How",
                "Organize your thoughts: Context, Problem, Solution, Benefits",
                "Break down your message: Main Idea, Supporting Points, Conclusion",
            ]),
            rules: default_rules(),
            default_guidance:
                "Your message is clear. What specific aspect would you like to discuss?".into(),
        }
    }
}

impl CoachConfig {
    /// Whether a message of `word_count` words gets guidance.
    pub fn wants_guidance(&self, word_count: usize) -> bool {
        word_count > self.min_words
    }

    /// Whether a message with these insights gets a framework suggestion.
    pub fn wants_framework(&self, insights: &StyleInsights) -> bool {
        insights.score > self.framework_threshold
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_rules() -> Vec<GuidanceRule> {
    vec![
        GuidanceRule {
            when: GuidanceCondition::Category(Category::VeryComplex),
            advice: strings(&[
                "Your message is quite complex. Could you break it down into key points?",
                "I'm sensing a lot of depth. Would you mind highlighting the main idea?",
                "That's a comprehensive perspective. Can you distill it to its core message?",
            ]),
        },
        GuidanceRule {
            when: GuidanceCondition::Category(Category::Complex),
            advice: strings(&[
                "Your message has layers. What's the primary point you want to convey?",
                "Interesting thoughts! Could you summarize the key takeaway?",
                "I see multiple ideas here. Which one would you like to focus on?",
            ]),
        },
        GuidanceRule {
            when: GuidanceCondition::AvgSentenceLengthAbove(20.0),
            advice: strings(&[
                "{length_feedback} Try using shorter, clearer sentences.",
                "Long sentences can be hard to follow. Consider breaking them up.",
                "Aim for clarity: shorter sentences often communicate ideas more effectively.",
            ]),
        },
        GuidanceRule {
            when: GuidanceCondition::DiversityBelow(0.3),
            advice: strings(&[
                "{vocabulary_feedback} Experiment with more descriptive words.",
                "Varied language can make your communication more engaging.",
                "Try using synonyms to add depth to your expression.",
            ]),
        },
    ]
}

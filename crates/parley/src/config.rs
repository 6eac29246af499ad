//! Responder configuration: rule table, templates, knowledge and thresholds.
//!
//! [`ResponderConfig::default`] holds the built-in auto-dealership tables.
//! A JSON file may replace any top-level section; missing sections keep
//! their defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use parley_complexity::Analyzer;
use parley_complexity::coach::CoachConfig;
use parley_normalize::DEFAULT_STOP_WORDS;
use parley_rules::{MatchConfig, Response, Rule};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::knowledge::KnowledgeBase;
use crate::templates::{
    FAREWELL, GREETING, REQUIRED_GROUPS, TemplateTables, UNKNOWN, UNKNOWN_DETAILED, UNKNOWN_SHORT,
};

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("template group `{0}` is missing or empty")]
    MissingTemplateGroup(String),
    #[error("rule {index} replies from unknown template group `{group}`")]
    UnknownRuleTemplate { index: usize, group: String },
    #[error("coaching needs at least one framework")]
    EmptyFrameworks,
    #[error("complexity normalizer `{name}` must be a positive number, got {value}")]
    InvalidNormalizer { name: &'static str, value: f64 },
}

/// Everything a [`Responder`](crate::Responder) is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderConfig {
    pub stop_words: Vec<String>,
    pub matching: MatchConfig,
    /// Rules in table order.
    pub rules: Vec<Rule>,
    pub templates: TemplateTables,
    pub knowledge: KnowledgeBase,
    pub complexity: Analyzer,
    pub coaching: CoachConfig,
    /// Messages with fewer normalized tokens get the short unknown reply.
    pub short_tokens: usize,
    /// Messages with more normalized tokens get the detailed unknown reply.
    pub detailed_tokens: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        ResponderConfig {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            matching: MatchConfig::default(),
            rules: default_rules(),
            templates: default_templates(),
            knowledge: KnowledgeBase::dealership(),
            complexity: Analyzer::default(),
            coaching: CoachConfig::default(),
            short_tokens: 3,
            detailed_tokens: 50,
        }
    }
}

impl ResponderConfig {
    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ResponderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every template group the responder relies on exists.
    ///
    /// Rules that can never score are accepted with a warning: they are a
    /// configuration defect that degrades to "never matches".
    pub fn validate(&self) -> Result<(), ConfigError> {
        for group in REQUIRED_GROUPS {
            if !self.templates.has_entries(group) {
                return Err(ConfigError::MissingTemplateGroup(group.to_string()));
            }
        }

        for (index, rule) in self.rules.iter().enumerate() {
            if let Response::Template(group) = &rule.response {
                if !self.templates.has_entries(group) {
                    return Err(ConfigError::UnknownRuleTemplate {
                        index,
                        group: group.clone(),
                    });
                }
            }
            if !rule.is_reachable() {
                warn!(index, "rule has no keywords and will never match");
            }
        }

        if self.coaching.frameworks.is_empty() {
            return Err(ConfigError::EmptyFrameworks);
        }

        if let Some((name, value)) = self.complexity.weights.invalid_norm() {
            return Err(ConfigError::InvalidNormalizer { name, value });
        }

        Ok(())
    }
}

fn default_rules() -> Vec<Rule> {
    vec![
        Rule::template(
            GREETING,
            ["hello", "hi", "hey", "sup", "heyo", "dealership", "car", "vehicle"],
        )
        .single(),
        Rule::text("See you soon!", ["bye", "goodbye", "later"]).single(),
        Rule::text(
            "Sedans are great for daily commuting and family use.",
            ["sedan", "car"],
        )
        .requiring(["sedan"]),
        Rule::text(
            "SUVs offer versatility and space for families and adventures.",
            ["suv", "vehicle"],
        )
        .requiring(["suv"]),
        Rule::text(
            "Trucks are powerful and perfect for work and heavy-duty tasks.",
            ["truck", "vehicle"],
        )
        .requiring(["truck"]),
        Rule::text(
            "Let me guide you through our comprehensive buying process.",
            ["buy", "purchase", "process"],
        )
        .requiring(["buy"]),
        Rule::text(
            "We offer multiple financing options to suit your needs.",
            ["finance", "loan", "payment"],
        )
        .requiring(["finance"]),
        Rule::text(
            "Regular maintenance is key to keeping your vehicle in top condition.",
            ["maintain", "service", "repair"],
        )
        .requiring(["maintain"]),
        Rule::text(
            "Our team is ready to help you get the best deal possible.",
            ["negotiate", "price", "deal"],
        )
        .requiring(["negotiate"]),
    ]
}

fn default_templates() -> TemplateTables {
    let mut templates = TemplateTables::new();
    templates.insert(
        GREETING,
        [
            "Welcome to our Auto Dealership Assistant! How can I help you find your perfect vehicle today?",
            "Hello! Ready to explore our amazing vehicle lineup? What are you looking for?",
            "Greetings! I'm here to guide you through your auto buying journey. What questions do you have?",
            "Hey there! Whether you're buying, financing, or just curious about cars, I'm your expert.",
        ],
    );
    templates.insert(
        FAREWELL,
        [
            "Drive safely and hope to see you soon at our dealership!",
            "Thank you for choosing our dealership. Your dream car awaits!",
            "We appreciate your interest. Come back anytime for automotive advice!",
            "Wishing you smooth roads ahead. Don't hesitate to return with more questions!",
        ],
    );
    templates.insert(
        UNKNOWN,
        [
            "I specialize in auto dealership topics. Could you rephrase your automotive question?",
            "Not quite sure about that. I'm an expert in vehicles, buying process, and dealership services.",
            "Let me help you. Are you looking for vehicle information, buying advice, or financing details?",
            "I'm your automotive guide. Could you be more specific about what you need?",
        ],
    );
    templates.insert(
        UNKNOWN_SHORT,
        ["That's quite short. Could you elaborate on your automotive query?"],
    );
    templates.insert(
        UNKNOWN_DETAILED,
        ["Wow, that's a detailed message! Let me help you break down your automotive needs."],
    );
    templates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ResponderConfig::default().validate().unwrap();
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = ResponderConfig::from_json("{}").unwrap();
        assert_eq!(config, ResponderConfig::default());
    }

    #[test]
    fn json_round_trip() {
        let config = ResponderConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert_eq!(ResponderConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn sections_replace_defaults() {
        let json = r#"{
            "rules": [
                { "response": { "text": "Howdy!" }, "keywords": ["howdy"], "single_response": true }
            ],
            "matching": { "min_confidence": 80 }
        }"#;
        let config = ResponderConfig::from_json(json).unwrap();
        assert_eq!(config.rules, vec![Rule::text("Howdy!", ["howdy"]).single()]);
        assert_eq!(config.matching.min_confidence, 80);
        assert!((config.matching.similarity_threshold - 0.6).abs() < f64::EPSILON);
        assert_eq!(config.templates, default_templates());
    }

    #[test]
    fn missing_template_group_is_rejected() {
        let json = r#"{ "templates": { "greeting": ["Hi"], "unknown": ["?"] } }"#;
        let err = ResponderConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTemplateGroup(ref g) if g == FAREWELL));
    }

    #[test]
    fn empty_template_group_is_rejected() {
        let mut config = ResponderConfig::default();
        config.templates.insert(UNKNOWN, Vec::<String>::new());
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "template group `unknown` is missing or empty");
    }

    #[test]
    fn rule_with_unknown_template_is_rejected() {
        let mut config = ResponderConfig::default();
        config.rules.push(Rule::template("jokes", ["joke"]));
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownRuleTemplate { index: 9, ref group } if group == "jokes"
        ));
    }

    #[test]
    fn unreachable_rule_is_accepted() {
        let mut config = ResponderConfig::default();
        config.rules.push(Rule::text("never", Vec::<String>::new()));
        config.validate().unwrap();
    }

    #[test]
    fn empty_frameworks_are_rejected() {
        let json = r#"{ "coaching": { "frameworks": [] } }"#;
        let err = ResponderConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyFrameworks));
    }

    #[test]
    fn zero_normalizer_is_rejected() {
        let json = r#"{ "complexity": { "weights": { "sentence_length_norm": 0.0 } } }"#;
        let err = ResponderConfig::from_json(json).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidNormalizer { name: "sentence_length_norm", .. }
        ));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = ResponderConfig::from_json("{ rules: ").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn load_missing_file_fails() {
        let err = ResponderConfig::load(Path::new("/nonexistent/parley.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/parley.json"));
    }

    #[test]
    fn load_reads_file() {
        let path = std::env::temp_dir().join("parley_test_load_config.json");
        fs::write(&path, r#"{ "short_tokens": 5 }"#).unwrap();
        let config = ResponderConfig::load(&path).unwrap();
        assert_eq!(config.short_tokens, 5);
        fs::remove_file(&path).ok();
    }
}

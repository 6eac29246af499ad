//! Parley: a rule-based conversational responder.
//!
//! This is the facade crate that wires together the lower-level components:
//! - [`parley_normalize`]: lowercasing, punctuation stripping, stop words
//! - [`parley_similarity`]: fuzzy word similarity
//! - [`parley_rules`]: keyword rule scoring and best-match selection
//! - [`parley_complexity`]: complexity scoring and communication guidance
//!
//! A message is normalized and scored against every rule; the best rule
//! answers when it scores at least 50. Otherwise the fallback chain in
//! [`Responder::fallback`] builds a reply from domain knowledge, complexity
//! analysis and canned templates.
//!
//! # Quick Start
//!
//! ```
//! use parley::{RandomChooser, Responder, ResponderConfig};
//! use rand::SeedableRng;
//! use rand::rngs::SmallRng;
//!
//! let chooser = RandomChooser::new(SmallRng::seed_from_u64(42));
//! let mut bot = Responder::new(ResponderConfig::default(), chooser);
//! let reply = bot.respond("I want to buy a sedan");
//! println!("{reply}");
//! ```

use parley_normalize::Normalizer;
use parley_rules::best_match;
use tracing::debug;

mod choose;
mod config;
mod fallback;
mod knowledge;
mod templates;

pub use choose::{Chooser, FirstChooser, RandomChooser};
pub use config::{ConfigError, ResponderConfig};
pub use knowledge::{DomainResponder, KnowledgeBase, NoDomain, Topic};
pub use templates::{
    FAREWELL, GREETING, REQUIRED_GROUPS, TemplateTables, UNKNOWN, UNKNOWN_DETAILED, UNKNOWN_SHORT,
};

// Re-export the component APIs that consumers (like the CLI) need.
pub use parley_complexity::coach::{
    CoachConfig, GuidanceCondition, GuidanceRule, StyleInsights, select_guidance,
};
pub use parley_complexity::{Analyzer, Category, TextStats, category, complexity};
pub use parley_normalize::normalize;
pub use parley_rules::{Match, MatchConfig, Response, Rule, score};
pub use parley_similarity::{ratio, similar};

/// The conversational engine.
///
/// Generic over the [`Chooser`] that picks among equally valid templates.
/// Production code uses [`RandomChooser`]; tests inject a deterministic one.
pub struct Responder<C: Chooser> {
    config: ResponderConfig,
    normalizer: Normalizer,
    /// Consulted first by the fallback chain.
    domain: Box<dyn DomainResponder>,
    chooser: C,
}

impl<C: Chooser> Responder<C> {
    /// Create a responder. The configuration's knowledge base becomes the
    /// domain responder.
    pub fn new(config: ResponderConfig, chooser: C) -> Self {
        let normalizer = Normalizer::with_stop_words(&config.stop_words);
        let domain = Box::new(config.knowledge.clone());
        Responder {
            config,
            normalizer,
            domain,
            chooser,
        }
    }

    /// Replace the domain responder.
    pub fn set_domain(&mut self, domain: impl DomainResponder + 'static) {
        self.domain = Box::new(domain);
    }

    pub fn config(&self) -> &ResponderConfig {
        &self.config
    }

    pub fn chooser(&self) -> &C {
        &self.chooser
    }

    /// Reply to one user message.
    ///
    /// The best-scoring rule answers when it clears the confidence
    /// threshold; otherwise the reply comes from [`Responder::fallback`].
    pub fn respond(&mut self, text: &str) -> String {
        let tokens = self.normalizer.normalize(text);

        match best_match(&tokens, &self.config.rules, &self.config.matching) {
            Some(m) => {
                debug!(index = m.index, score = m.score, "rule matched");
                match &m.rule.response {
                    Response::Text(reply) => reply.clone(),
                    Response::Template(group) => {
                        self.config.templates.pick(group, &mut self.chooser)
                    }
                }
            }
            None => {
                debug!(tokens = tokens.len(), "no confident match");
                self.fallback(text)
            }
        }
    }

    /// Opening line for a conversation.
    pub fn greet(&mut self) -> String {
        self.config.templates.pick(GREETING, &mut self.chooser)
    }

    /// Closing line for a conversation.
    pub fn farewell(&mut self) -> String {
        self.config.templates.pick(FAREWELL, &mut self.chooser)
    }

    /// Complexity and communication-style analysis of a message.
    pub fn analyze(&self, text: &str) -> StyleInsights {
        StyleInsights::from_text(text, &self.config.complexity)
    }
}

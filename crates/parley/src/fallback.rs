//! Reply synthesis when no rule is confident enough.
//!
//! The chain, in order:
//!
//! 1. **Domain knowledge**: a reply from the [`DomainResponder`] wins outright.
//! 2. **Coaching**: long messages get an unknown reply, a summarization
//!    suggestion for their complexity category, communication guidance and,
//!    for very complex messages, a framework for organizing thoughts.
//! 3. **Length-varied unknown**: short messages get the "too short" reply,
//!    very long ones the "very detailed" reply, the rest a plain unknown reply.
//!
//! [`DomainResponder`]: crate::DomainResponder

use parley_complexity::coach::{StyleInsights, select_guidance};
use tracing::debug;

use crate::Responder;
use crate::choose::Chooser;
use crate::templates::{UNKNOWN, UNKNOWN_DETAILED, UNKNOWN_SHORT};

impl<C: Chooser> Responder<C> {
    /// Build a reply for a message that matched no rule.
    ///
    /// Never fails: empty or punctuation-only text takes the short-message
    /// branch.
    pub fn fallback(&mut self, text: &str) -> String {
        if let Some(reply) = self.domain.reply(&text.to_lowercase()) {
            debug!("domain knowledge answered");
            return reply;
        }

        let word_count = text.split_whitespace().count();
        if self.config.coaching.wants_guidance(word_count) {
            debug!(word_count, "coaching long message");
            return self.coach(text);
        }

        let tokens = self.normalizer.normalize(text).len();
        let group = if tokens < self.config.short_tokens {
            UNKNOWN_SHORT
        } else if tokens > self.config.detailed_tokens {
            UNKNOWN_DETAILED
        } else {
            UNKNOWN
        };
        debug!(tokens, group, "length-varied unknown reply");
        self.config.templates.pick(group, &mut self.chooser)
    }

    /// Unknown reply + summarization suggestion + guidance (+ framework).
    fn coach(&mut self, text: &str) -> String {
        let config = &self.config;
        let coaching = &config.coaching;
        let insights = StyleInsights::from_text(text, &config.complexity);
        debug!(
            score = insights.score,
            category = %insights.category,
            "style insights"
        );

        let guidance = select_guidance(&coaching.rules, &insights)
            .and_then(|rule| self.chooser.choose(&rule.advice))
            .map(|advice| insights.render(advice))
            .unwrap_or_else(|| coaching.default_guidance.clone());

        let framework = if coaching.wants_framework(&insights) {
            self.chooser
                .choose(&coaching.frameworks)
                .map(|framework| format!("{} {framework}", coaching.framework_prefix))
        } else {
            None
        };

        let mut parts = vec![
            config.templates.pick(UNKNOWN, &mut self.chooser),
            config
                .complexity
                .suggestions
                .for_category(insights.category)
                .to_string(),
            guidance,
        ];
        parts.extend(framework);
        parts.join(" ")
    }
}

//! Named groups of canned replies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::choose::Chooser;

/// Opening line of a conversation.
pub const GREETING: &str = "greeting";
/// Closing line of a conversation.
pub const FAREWELL: &str = "farewell";
/// Generic reply when nothing better applies.
pub const UNKNOWN: &str = "unknown";
/// Unknown reply for very short messages.
pub const UNKNOWN_SHORT: &str = "unknown_short";
/// Unknown reply for very long messages.
pub const UNKNOWN_DETAILED: &str = "unknown_detailed";

/// Groups every configuration must provide.
pub const REQUIRED_GROUPS: &[&str] = &[
    GREETING,
    FAREWELL,
    UNKNOWN,
    UNKNOWN_SHORT,
    UNKNOWN_DETAILED,
];

/// Template groups keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateTables {
    groups: BTreeMap<String, Vec<String>>,
}

impl TemplateTables {
    pub fn new() -> Self {
        TemplateTables::default()
    }

    /// Add or replace a group.
    pub fn insert<I, S>(&mut self, group: impl Into<String>, entries: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups
            .insert(group.into(), entries.into_iter().map(Into::into).collect());
    }

    /// Entries of a group.
    pub fn group(&self, name: &str) -> Option<&[String]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    /// Whether a group exists and has at least one entry.
    pub fn has_entries(&self, name: &str) -> bool {
        self.group(name).is_some_and(|entries| !entries.is_empty())
    }

    /// Pick an entry from `group`, `None` when the group is missing or empty.
    pub fn try_pick<'a, C: Chooser>(&'a self, group: &str, chooser: &mut C) -> Option<&'a str> {
        chooser.choose(self.group(group)?)
    }

    /// Pick an entry from `group`, falling back to the unknown group.
    ///
    /// Returns an empty string only when both groups are missing, which
    /// configuration validation rules out.
    pub fn pick<C: Chooser>(&self, group: &str, chooser: &mut C) -> String {
        self.try_pick(group, chooser)
            .or_else(|| self.try_pick(UNKNOWN, chooser))
            .unwrap_or_default()
            .to_string()
    }
}

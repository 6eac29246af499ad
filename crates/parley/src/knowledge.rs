//! Domain knowledge consulted before the generic fallback.

use serde::{Deserialize, Serialize};

/// Answers domain questions the rule table did not catch.
///
/// `text` is the lowercased user message. Returning `Some` short-circuits the
/// fallback chain.
pub trait DomainResponder {
    fn reply(&self, text: &str) -> Option<String>;
}

impl<F> DomainResponder for F
where
    F: Fn(&str) -> Option<String>,
{
    fn reply(&self, text: &str) -> Option<String> {
        self(text)
    }
}

/// A responder with no domain knowledge.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDomain;

impl DomainResponder for NoDomain {
    fn reply(&self, _text: &str) -> Option<String> {
        None
    }
}

/// A reply offered when any trigger occurs in the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    /// Substrings looked for in the lowercased message.
    pub triggers: Vec<String>,
    pub reply: String,
}

impl Topic {
    pub fn new<I, S>(triggers: I, reply: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Topic {
            triggers: triggers.into_iter().map(Into::into).collect(),
            reply: reply.into(),
        }
    }

    pub fn matches(&self, text: &str) -> bool {
        self.triggers
            .iter()
            .any(|t| !t.is_empty() && text.contains(t.as_str()))
    }
}

/// Ordered topics; the first matching topic answers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KnowledgeBase {
    topics: Vec<Topic>,
}

impl KnowledgeBase {
    pub fn new(topics: Vec<Topic>) -> Self {
        KnowledgeBase { topics }
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Auto-dealership knowledge: vehicle types, buying process, financing,
    /// maintenance and negotiation.
    pub fn dealership() -> Self {
        let vehicles: [(&str, &[&str]); 5] = [
            ("sedan", &["comfortable", "fuel-efficient", "family-friendly"]),
            ("suv", &["spacious", "versatile", "good for families and outdoor activities"]),
            ("truck", &["powerful", "work-oriented", "high towing capacity"]),
            ("electric", &["eco-friendly", "low maintenance", "advanced technology"]),
            ("hybrid", &["fuel-efficient", "environmentally conscious", "lower emissions"]),
        ];
        let mut topics: Vec<Topic> = vehicles
            .iter()
            .map(|(vehicle, traits)| {
                Topic::new(
                    [*vehicle],
                    format!(
                        "Looking for a {vehicle}? They are known for being {}.",
                        traits.join(", ")
                    ),
                )
            })
            .collect();

        topics.push(Topic::new(
            ["buy", "purchase", "process"],
            numbered(
                "Auto Buying Process:",
                &[
                    "Research vehicles",
                    "Determine budget",
                    "Check credit score",
                    "Get pre-approved financing",
                    "Test drive vehicles",
                    "Negotiate price",
                    "Review contract",
                    "Complete purchase",
                ],
            ),
        ));
        topics.push(Topic::new(
            ["finance", "loan", "payment"],
            listed(
                "Financing Options:",
                "- ",
                &[
                    "Bank loan",
                    "Dealership financing",
                    "Credit union loan",
                    "Manufacturer special financing",
                    "Lease options",
                ],
            ),
        ));
        topics.push(Topic::new(
            ["maintain", "service", "repair"],
            listed(
                "Key Maintenance Tips:",
                "",
                &[
                    "Regular oil changes",
                    "Tire rotation and balance",
                    "Brake system check",
                    "Battery and electrical system inspection",
                ],
            ),
        ));
        topics.push(Topic::new(
            ["negotiate", "price", "deal"],
            listed(
                "Negotiation Tips:",
                "",
                &[
                    "Know the market value of the vehicle",
                    "Get quotes from multiple dealerships",
                    "Don't focus only on monthly payments",
                    "Be prepared to walk away",
                    "Consider total cost of ownership",
                ],
            ),
        ));

        KnowledgeBase::new(topics)
    }
}

impl DomainResponder for KnowledgeBase {
    fn reply(&self, text: &str) -> Option<String> {
        self.topics
            .iter()
            .find(|topic| topic.matches(text))
            .map(|topic| topic.reply.clone())
    }
}

fn numbered(title: &str, items: &[&str]) -> String {
    let mut out = title.to_string();
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("\n{}. {item}", i + 1));
    }
    out
}

fn listed(title: &str, bullet: &str, items: &[&str]) -> String {
    let mut out = title.to_string();
    for item in items {
        out.push('\n');
        out.push_str(bullet);
        out.push_str(item);
    }
    out
}

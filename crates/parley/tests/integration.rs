//! Integration tests for parley: the full respond pipeline with the default
//! auto-dealership tables and with small hand-built rule tables.

use std::collections::HashSet;

use parley::{
    Category, Chooser, FirstChooser, GREETING, NoDomain, RandomChooser, Responder,
    ResponderConfig, Response, Rule, UNKNOWN, UNKNOWN_DETAILED, UNKNOWN_SHORT, complexity, score,
    select_guidance,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Picks the first option and remembers every list it was offered.
#[derive(Default)]
struct RecordingChooser {
    offered: Vec<Vec<String>>,
}

impl Chooser for RecordingChooser {
    fn choose<'a>(&mut self, options: &'a [String]) -> Option<&'a str> {
        self.offered.push(options.to_vec());
        options.first().map(String::as_str)
    }
}

fn default_bot() -> Responder<FirstChooser> {
    let mut bot = Responder::new(ResponderConfig::default(), FirstChooser);
    // Keep the fallback away from the dealership topics.
    bot.set_domain(NoDomain);
    bot
}

fn bot_with_rules(rules: Vec<Rule>) -> Responder<FirstChooser> {
    let config = ResponderConfig {
        rules,
        ..ResponderConfig::default()
    };
    Responder::new(config, FirstChooser)
}

fn first(group: &str) -> String {
    ResponderConfig::default().templates.group(group).unwrap()[0].clone()
}

fn group_set(groups: &[&str]) -> HashSet<String> {
    let config = ResponderConfig::default();
    groups
        .iter()
        .flat_map(|g| config.templates.group(g).unwrap().iter().cloned())
        .collect()
}

// ---------------------------------------------------------------------------
// Rule matching
// ---------------------------------------------------------------------------

#[test]
fn single_keyword_rule_scores() {
    let keywords = vec!["hello".to_string()];
    assert_eq!(score(&["hello", "there"], &keywords, &[], true, 0.6), 100);
    assert_eq!(score(&["goodbye"], &keywords, &[], true, 0.6), 0);
}

#[test]
fn hi_matches_greeting_rule() {
    let mut bot = bot_with_rules(vec![
        Rule::text("Hello, welcome!", ["hi", "hello"]).single(),
        Rule::text("Sedans are great.", ["sedan", "car"]).requiring(["sedan"]),
    ]);
    assert_eq!(bot.respond("hi"), "Hello, welcome!");
}

#[test]
fn greeting_template_rule_picks_from_group() {
    let mut bot = bot_with_rules(vec![Rule::template(GREETING, ["hi", "hello"]).single()]);
    assert_eq!(bot.respond("Hi!"), first(GREETING));
}

#[test]
fn tied_rules_answer_with_a_top_scorer() {
    let rules = vec![
        Rule::text("first", ["deal"]).single(),
        Rule::text("second", ["deal"]).single(),
        Rule::text("third", ["deal", "price"]).single(),
    ];
    let scores: Vec<u8> = rules.iter().map(|rule| rule.score(&["deal"], 0.6)).collect();
    let top = *scores.iter().max().unwrap();

    let mut bot = bot_with_rules(rules.clone());
    let reply = bot.respond("deal");
    let winner = rules
        .iter()
        .position(|rule| rule.response == Response::Text(reply.clone()))
        .unwrap();
    assert_eq!(scores[winner], top);
    assert_ne!(reply, "third");
}

#[test]
fn default_table_answers_vehicle_questions() {
    let mut bot = default_bot();
    assert_eq!(
        bot.respond("Do you have any trucks?"),
        "Trucks are powerful and perfect for work and heavy-duty tasks."
    );
    assert_eq!(
        bot.respond("Can we negotiate the price?"),
        "Our team is ready to help you get the best deal possible."
    );
}

// ---------------------------------------------------------------------------
// Degenerate input
// ---------------------------------------------------------------------------

#[test]
fn empty_input_returns_fallback_template() {
    let mut bot = default_bot();
    let reply = bot.respond("");
    assert!(group_set(&[UNKNOWN, UNKNOWN_SHORT, UNKNOWN_DETAILED]).contains(&reply));
}

#[test]
fn whitespace_and_punctuation_inputs_never_fail() {
    let mut bot = default_bot();
    for input in ["   ", "\n\t", "!!!", "...???", "--"] {
        let reply = bot.respond(input);
        assert_eq!(reply, first(UNKNOWN_SHORT), "input {input:?}");
    }
}

// ---------------------------------------------------------------------------
// Fallback chain
// ---------------------------------------------------------------------------

#[test]
fn domain_knowledge_answers_before_coaching() {
    let mut bot = Responder::new(ResponderConfig::default(), FirstChooser);
    let long = format!("{} and what about a hybrid", "blah ".repeat(30));
    let reply = bot.respond(&long);
    assert!(reply.starts_with("Looking for a hybrid?"), "{reply}");
}

#[test]
fn long_message_gets_suggestion_and_guidance() {
    let mut bot = default_bot();
    let text = "blah ".repeat(24);
    let insights = bot.analyze(&text);

    // 24 words, one sentence: 0.3 * 24/50 + 0.2 * 1/24 + 0.3 * 24/20 + 0.2 * 4/6.
    let expected = 100.0 * (0.3 * 0.48 + 0.2 / 24.0 + 0.3 * 1.2 + 0.2 * 4.0 / 6.0);
    assert!((insights.score - expected).abs() < 1e-9);
    assert!((complexity(&text) - expected).abs() < 1e-9);
    assert_eq!(insights.category, Category::Complex);

    let config = ResponderConfig::default();
    let rule = select_guidance(&config.coaching.rules, &insights).unwrap();
    let expected_reply = [
        first(UNKNOWN),
        config
            .complexity
            .suggestions
            .for_category(insights.category)
            .to_string(),
        insights.render(&rule.advice[0]),
    ]
    .join(" ");

    assert_eq!(bot.respond(&text), expected_reply);
}

#[test]
fn very_complex_message_gets_framework() {
    let mut bot = default_bot();
    let words: Vec<String> = (0..30).map(|i| format!("lexeme{i}")).collect();
    let text = words.join(" ");
    assert_eq!(bot.analyze(&text).category, Category::VeryComplex);

    let reply = bot.respond(&text);
    let config = ResponderConfig::default();
    assert!(reply.starts_with(&first(UNKNOWN)));
    assert!(reply.contains(&config.complexity.suggestions.very_complex));
    assert!(reply.contains(&config.coaching.rules[0].advice[0]));
    assert!(reply.ends_with(&format!(
        "{} {}",
        config.coaching.framework_prefix, config.coaching.frameworks[0]
    )));
}

#[test]
fn moderate_long_message_has_no_framework() {
    let mut bot = default_bot();
    let text = "blah ".repeat(24);
    let reply = bot.respond(&text);
    let config = ResponderConfig::default();
    for framework in &config.coaching.frameworks {
        assert!(!reply.contains(framework.as_str()));
    }
}

#[test]
fn twenty_words_is_not_long() {
    let mut bot = default_bot();
    let text = "blah ".repeat(20);
    assert_eq!(bot.respond(&text), first(UNKNOWN));
}

#[test]
fn very_long_message_gets_detailed_variant_when_coaching_is_off() {
    let mut config = ResponderConfig::default();
    config.coaching.min_words = 1000;
    let mut bot = Responder::new(config, FirstChooser);
    bot.set_domain(NoDomain);
    assert_eq!(bot.respond(&"blah ".repeat(60)), first(UNKNOWN_DETAILED));
}

#[test]
fn coaching_picks_go_through_chooser() {
    let mut bot = Responder::new(ResponderConfig::default(), RecordingChooser::default());
    bot.set_domain(NoDomain);
    let words: Vec<String> = (0..30).map(|i| format!("lexeme{i}")).collect();
    bot.respond(&words.join(" "));

    let config = ResponderConfig::default();
    let offered = &bot.chooser().offered;
    assert_eq!(offered.len(), 3, "guidance, framework and unknown picks");
    assert_eq!(offered[0], config.coaching.rules[0].advice);
    assert_eq!(offered[1], config.coaching.frameworks);
    assert_eq!(offered[2], config.templates.group(UNKNOWN).unwrap());
}

#[test]
fn guidance_falls_back_to_default_when_no_rule_holds() {
    let mut config = ResponderConfig::default();
    config.coaching.rules.clear();
    let default_guidance = config.coaching.default_guidance.clone();
    let mut bot = Responder::new(config, FirstChooser);
    bot.set_domain(NoDomain);
    let reply = bot.respond(&"blah ".repeat(24));
    assert!(reply.ends_with(&default_guidance), "{reply}");
}

// ---------------------------------------------------------------------------
// Randomized choice
// ---------------------------------------------------------------------------

#[test]
fn seeded_responses_are_reproducible() {
    let run = || {
        let chooser = RandomChooser::new(SmallRng::seed_from_u64(42));
        let mut bot = Responder::new(ResponderConfig::default(), chooser);
        [
            "hello hi hey sup",
            "blah blah random stuff",
            "",
            "I want to buy a sedan",
        ]
        .iter()
        .map(|input| bot.respond(input))
        .collect::<Vec<_>>()
    };
    assert_eq!(run(), run());
}

#[test]
fn random_greeting_comes_from_group() {
    let chooser = RandomChooser::new(SmallRng::seed_from_u64(9));
    let mut bot = Responder::new(ResponderConfig::default(), chooser);
    let greetings = group_set(&[GREETING]);
    for _ in 0..20 {
        assert!(greetings.contains(&bot.greet()));
        assert!(greetings.contains(&bot.respond("hello hi hey sup")));
    }
}

// ---------------------------------------------------------------------------
// Configuration files
// ---------------------------------------------------------------------------

#[test]
fn responder_from_json_config() {
    let json = r#"{
        "rules": [
            { "response": { "text": "Howdy partner!" }, "keywords": ["howdy", "hi"], "single_response": true }
        ],
        "knowledge": []
    }"#;
    let config = ResponderConfig::from_json(json).unwrap();
    let mut bot = Responder::new(config, FirstChooser);
    assert_eq!(bot.respond("Howdy!"), "Howdy partner!");
    // No knowledge topics: "sedan" now falls through to the unknown reply.
    assert_eq!(bot.respond("any sedan deals"), first(UNKNOWN));
}

//! Feedback-driven rewrites of generated ad content.
//!
//! Rules are evaluated in order against the lower-cased feedback text. A
//! rule fires when any of its trigger phrases occurs as a substring, and
//! every rule that fires is applied, so one piece of feedback can compound
//! several rewrites ("shorter and more friendly" shortens, then adds the
//! casual touches).

use hyperlocal_core::types::AdContent;
use tracing::debug;

pub const HEADLINE_MAX_CHARS: usize = 50;
pub const DESCRIPTION_MAX_CHARS: usize = 120;

const HEADLINE_DELIMITER: &str = " - ";
const DETAIL_SENTENCE: &str =
    " Visit us today and discover why our customers keep coming back for more.";
const FORMAL_OPENER: &str = "We are pleased to announce that ";
const CASUAL_HEADLINE_SUFFIX: &str = " 🎉";
const CASUAL_OPENER: &str = "Hey! ";
const PROMO_SENTENCE: &str = " Don't miss our exclusive discounts, available for a limited time only!";

type Transform = fn(&mut AdContent);

/// A named (trigger, transform) pair.
#[derive(Clone)]
pub struct FeedbackRule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    transform: Transform,
}

impl FeedbackRule {
    pub fn new(name: &'static str, triggers: &'static [&'static str], transform: Transform) -> Self {
        Self {
            name,
            triggers,
            transform,
        }
    }

    /// `normalized` must already be lower-cased.
    pub fn matches(&self, normalized: &str) -> bool {
        self.triggers.iter().any(|t| normalized.contains(t))
    }

    pub fn apply(&self, content: &mut AdContent) {
        (self.transform)(content)
    }
}

impl std::fmt::Debug for FeedbackRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackRule")
            .field("name", &self.name)
            .field("triggers", &self.triggers)
            .finish()
    }
}

/// Ordered, non-exclusive rule list.
#[derive(Debug, Clone)]
pub struct FeedbackEngine {
    rules: Vec<FeedbackRule>,
}

impl FeedbackEngine {
    pub fn new() -> Self {
        Self {
            rules: vec![
                FeedbackRule::new("shorter", &["shorter", "brief"], make_shorter),
                FeedbackRule::new("longer", &["longer", "more detail"], make_longer),
                FeedbackRule::new("formal", &["formal", "professional"], make_formal),
                FeedbackRule::new("casual", &["casual", "friendly"], make_casual),
                FeedbackRule::new("promotional", &["offer", "discount"], add_promotion),
            ],
        }
    }

    pub fn with_rules(rules: Vec<FeedbackRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FeedbackRule] {
        &self.rules
    }

    /// Apply every matching rule in order. Returns the names of the rules
    /// that fired.
    pub fn apply(&self, content: &mut AdContent, feedback: &str) -> Vec<&'static str> {
        let normalized = feedback.to_lowercase();
        let mut fired = Vec::new();
        for rule in &self.rules {
            if rule.matches(&normalized) {
                rule.apply(content);
                fired.push(rule.name);
            }
        }
        debug!(rules = ?fired, "applied feedback rules");
        fired
    }
}

impl Default for FeedbackEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn make_shorter(content: &mut AdContent) {
    let head = match content.headline.find(HEADLINE_DELIMITER) {
        Some(idx) => &content.headline[..idx],
        None => content.headline.as_str(),
    };
    content.headline = truncate_chars(head, HEADLINE_MAX_CHARS);

    if content.description.chars().count() > DESCRIPTION_MAX_CHARS {
        content.description = format!(
            "{}...",
            truncate_chars(&content.description, DESCRIPTION_MAX_CHARS)
        );
    }
}

fn make_longer(content: &mut AdContent) {
    content.description.push_str(DETAIL_SENTENCE);
}

// The whole previous description is lower-cased, not just its first word.
fn make_formal(content: &mut AdContent) {
    if let Some(stripped) = content.headline.strip_suffix('!') {
        content.headline = format!("{stripped}.");
    }
    content.description = format!("{FORMAL_OPENER}{}", content.description.to_lowercase());
}

fn make_casual(content: &mut AdContent) {
    content.headline.push_str(CASUAL_HEADLINE_SUFFIX);
    content.description = format!("{CASUAL_OPENER}{}", content.description);
}

fn add_promotion(content: &mut AdContent) {
    content.description.push_str(PROMO_SENTENCE);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyperlocal_core::types::TargetAudience;

    fn content(headline: &str, description: &str) -> AdContent {
        AdContent {
            headline: headline.to_string(),
            description: description.to_string(),
            call_to_action: "Visit Our Store".to_string(),
            keywords: vec!["chai".to_string()],
            target_audience: TargetAudience {
                location: "Pune".to_string(),
                language: "Marathi".to_string(),
                interests: vec![],
            },
        }
    }

    #[test]
    fn test_shorter_and_professional_compound() {
        let engine = FeedbackEngine::new();
        let mut c = content("Delicious Chai in Pune - Order Now!", "Fresh Chai Daily.");
        let fired = engine.apply(&mut c, "shorter and professional");
        assert_eq!(fired, vec!["shorter", "formal"]);
        assert_eq!(c.headline, "Delicious Chai in Pune");
        assert_eq!(c.description, "We are pleased to announce that fresh chai daily.");
    }

    #[test]
    fn test_formal_replaces_trailing_bang_after_shortening() {
        let engine = FeedbackEngine::new();
        let mut c = content("Best Chai Deals Today!", "Hot Chai.");
        engine.apply(&mut c, "Make it BRIEF and formal");
        assert_eq!(c.headline, "Best Chai Deals Today.");
    }

    #[test]
    fn test_shorter_hard_cuts_long_text() {
        let engine = FeedbackEngine::new();
        let long_headline = "A".repeat(70);
        let long_description = "b".repeat(200);
        let mut c = content(&long_headline, &long_description);
        engine.apply(&mut c, "shorter please");
        assert_eq!(c.headline.chars().count(), HEADLINE_MAX_CHARS);
        assert_eq!(c.description.chars().count(), DESCRIPTION_MAX_CHARS + 3);
        assert!(c.description.ends_with("..."));

        let mut short = content("Chai", "Short description.");
        engine.apply(&mut short, "brief");
        assert_eq!(short.description, "Short description.");
    }

    #[test]
    fn test_shorter_then_friendly() {
        let engine = FeedbackEngine::new();
        let mut c = content("Chai in Pune - Order Now!", "Fresh chai.");
        let fired = engine.apply(&mut c, "shorter and more friendly");
        assert_eq!(fired, vec!["shorter", "casual"]);
        assert_eq!(c.headline, "Chai in Pune 🎉");
        assert_eq!(c.description, "Hey! Fresh chai.");
    }

    #[test]
    fn test_longer_and_offer_append_in_order() {
        let engine = FeedbackEngine::new();
        let mut c = content("Chai", "Fresh chai.");
        engine.apply(&mut c, "Add more detail and mention the discount");
        assert_eq!(
            c.description,
            format!("Fresh chai.{DETAIL_SENTENCE}{PROMO_SENTENCE}")
        );
    }

    #[test]
    fn test_unmatched_feedback_changes_nothing() {
        let engine = FeedbackEngine::new();
        let original = content("Chai", "Fresh chai.");
        let mut c = original.clone();
        assert!(engine.apply(&mut c, "use blue colours").is_empty());
        assert_eq!(c, original);
    }
}

use crate::store::Priority;

/// An ordered classification rule: first rule whose keyword set matches wins.
struct PriorityRule {
    keywords: &'static [&'static str],
    outcome: Priority,
}

const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "important",
    "emergency",
    "deadline",
    "meeting",
    "call",
    "now",
    "immediately",
];

const LOW_PRIORITY_KEYWORDS: &[&str] = &[
    "thanks",
    "thank you",
    "ok",
    "okay",
    "sure",
    "cool",
    "nice",
];

/// Keyword-based priority classifier.
///
/// Stateless and deterministic: lowercases the text and scans an ordered rule
/// table, substring match, first match wins. The high-priority rule precedes
/// the low-priority rule, so text matching both tiers classifies as high.
/// When disabled every message classifies as `Medium`.
pub struct Classifier {
    rules: Vec<PriorityRule>,
    enabled: bool,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Classifier {
    pub fn new(enabled: bool) -> Self {
        let rules = vec![
            PriorityRule {
                keywords: HIGH_PRIORITY_KEYWORDS,
                outcome: Priority::High,
            },
            PriorityRule {
                keywords: LOW_PRIORITY_KEYWORDS,
                outcome: Priority::Low,
            },
        ];
        Self { rules, enabled }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Map message text to a priority tier.
    pub fn classify(&self, text: &str) -> Priority {
        if !self.enabled {
            return Priority::Medium;
        }
        let lowered = text.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
            .map_or(Priority::Medium, |rule| rule.outcome)
    }
}

#[cfg(test)]
mod tests;

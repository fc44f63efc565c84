use super::*;

#[test]
fn urgent_text_is_high() {
    let classifier = Classifier::default();
    assert_eq!(classifier.classify("URGENT: call now"), Priority::High);
}

#[test]
fn gratitude_text_is_low() {
    let classifier = Classifier::default();
    assert_eq!(classifier.classify("thanks, sounds great"), Priority::Low);
}

#[test]
fn neutral_text_is_medium() {
    let classifier = Classifier::default();
    assert_eq!(classifier.classify("see you there"), Priority::Medium);
}

#[test]
fn high_takes_precedence_over_low() {
    let classifier = Classifier::default();
    // Matches both "thanks" (low) and "deadline" (high)
    assert_eq!(
        classifier.classify("thanks, but the deadline is tomorrow"),
        Priority::High
    );
}

#[test]
fn matching_is_case_insensitive() {
    let classifier = Classifier::default();
    assert_eq!(classifier.classify("EMERGENCY at the office"), Priority::High);
    assert_eq!(classifier.classify("OKAY then"), Priority::Low);
}

#[test]
fn keywords_match_as_substrings() {
    let classifier = Classifier::default();
    // "call" inside "recall" still matches — intentional substring semantics
    assert_eq!(classifier.classify("let me recall the details"), Priority::High);
}

#[test]
fn disabled_classifier_is_always_medium() {
    let classifier = Classifier::new(false);
    assert_eq!(classifier.classify("URGENT: emergency!"), Priority::Medium);
    assert_eq!(classifier.classify("thanks a lot"), Priority::Medium);
}

#[test]
fn set_enabled_toggles() {
    let mut classifier = Classifier::new(false);
    assert_eq!(classifier.classify("urgent"), Priority::Medium);
    classifier.set_enabled(true);
    assert_eq!(classifier.classify("urgent"), Priority::High);
    assert!(classifier.is_enabled());
}

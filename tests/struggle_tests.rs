//! Struggle scoring contract tests.
//!
//! The weights and thresholds are fixed constants, not tunables; these
//! tests pin the exact values (0.3 per indicator, 0.4 repetition, 0.3
//! latency, thresholds 0.5 and 0.7, 30000 ms latency bound).

use learnflow::agents::struggle::{detect, SLOW_RESPONSE_MS};
use rstest::rstest;

const EPSILON: f64 = 1e-9;

#[rstest]
#[case("I'm stuck and confused and lost", 0, 0.9)]
#[case("why does my for loop throw an error", 0, 0.6)]
#[case("I don't understand", 0, 0.3)]
#[case("ok", 40_000, 0.3)]
#[case("ok", 0, 0.0)]
fn pins_score_constants(
    #[case] text: &str,
    #[case] latency_ms: u64,
    #[case] expected: f64,
) {
    let signal = detect(text, &[], latency_ms);
    assert!(
        (signal.score - expected).abs() < EPSILON,
        "expected {expected}, got {}",
        signal.score
    );
}

#[test]
fn three_indicators_require_intervention() {
    let signal = detect("I'm stuck and confused and lost", &[], 0);
    assert!(signal.is_struggling);
    assert!(signal.requires_intervention);
    assert_eq!(signal.matched_indicators.len(), 3);
}

#[test]
fn slow_response_alone_is_below_the_struggling_threshold() {
    let signal = detect("ok", &[], 40_000);
    assert!(signal.matched_indicators.is_empty());
    assert!(!signal.is_struggling);
    assert!(!signal.requires_intervention);
}

#[test]
fn latency_bound_is_strictly_greater_than_30000() {
    assert!((detect("ok", &[], SLOW_RESPONSE_MS).score).abs() < EPSILON);
    assert!((detect("ok", &[], SLOW_RESPONSE_MS + 1).score - 0.3).abs() < EPSILON);
}

#[test]
fn two_indicators_cross_the_struggling_threshold_only() {
    let signal = detect("why is this not working", &[], 0);
    assert_eq!(signal.matched_indicators.len(), 2);
    assert!(signal.is_struggling);
    assert!(!signal.requires_intervention);
}

#[test]
fn one_overlapping_prior_message_is_not_repetition() {
    let history = vec!["how do i reverse a list".to_string()];
    let signal = detect("how do i reverse a list", &history, 0);
    assert!(signal.score.abs() < EPSILON);
}

#[test]
fn two_overlapping_prior_messages_add_the_repetition_weight() {
    let history = vec![
        "how do i reverse a list".to_string(),
        "reverse a list".to_string(),
        "something unrelated".to_string(),
    ];
    let signal = detect("how do i reverse a list", &history, 0);
    assert!((signal.score - 0.4).abs() < EPSILON);
}

#[test]
fn all_signals_combine_and_clamp_to_one() {
    let history = vec!["stuck and confused".to_string(), "not working".to_string()];
    let signal = detect("I'm stuck and confused, why is this not working", &history, 31_000);
    // 4 indicators (stuck, confused, why, not working) + repetition + latency,
    // clamped.
    assert!((signal.score - 1.0).abs() < EPSILON);
    assert!(signal.requires_intervention);
}

#[test]
fn scoring_is_idempotent_across_calls() {
    let history = vec!["what is a closure".to_string()];
    let a = detect("I'm lost, why doesn't this work", &history, 5_000);
    let b = detect("I'm lost, why doesn't this work", &history, 5_000);
    assert_eq!(a.score, b.score);
    assert_eq!(a.matched_indicators, b.matched_indicators);
    assert_eq!(a.is_struggling, b.is_struggling);
    assert_eq!(a.requires_intervention, b.requires_intervention);
}

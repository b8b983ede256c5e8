//! Struggle detection from conversational signals.
//!
//! A cheap, explainable heuristic suitable for real-time use without a
//! model call. Three signals contribute fixed weights: indicator phrases
//! in the message, repetition against recent history, and a slow observed
//! response. Thresholds are constants, not learned.

use crate::types::StruggleSignal;

/// Phrases that suggest the learner is struggling.
pub const STRUGGLE_INDICATORS: &[&str] = &[
    "stuck",
    "confused",
    "don't understand",
    "error",
    "why",
    "lost",
    "frustrated",
    "give up",
    "not working",
    "doesn't make sense",
    "how come",
];

/// Weight per distinct indicator phrase found.
pub const INDICATOR_WEIGHT: f64 = 0.3;
/// Weight added when the learner repeats themselves.
pub const REPETITION_WEIGHT: f64 = 0.4;
/// Weight added when the observed latency is slow.
pub const LATENCY_WEIGHT: f64 = 0.3;
/// Latency above this many milliseconds counts as slow.
pub const SLOW_RESPONSE_MS: u64 = 30_000;
/// Score above this marks the learner as struggling.
pub const STRUGGLING_THRESHOLD: f64 = 0.5;
/// Score above this flags the session for intervention.
pub const INTERVENTION_THRESHOLD: f64 = 0.7;

/// Scores a message for learner struggle.
///
/// Pure and deterministic: no I/O, no hidden state. The running score is
/// clamped to [0, 1] at the end, not per term.
pub fn detect(text: &str, history: &[String], observed_latency_ms: u64) -> StruggleSignal {
    let lower = text.to_lowercase();

    let matched_indicators: Vec<String> = STRUGGLE_INDICATORS
        .iter()
        .filter(|phrase| lower.contains(*phrase))
        .map(|phrase| phrase.to_string())
        .collect();

    let mut score = matched_indicators.len() as f64 * INDICATOR_WEIGHT;

    // Repetition: the learner asking the same thing again. Requires at
    // least two overlapping prior messages to avoid firing on a single
    // natural follow-up.
    let overlapping = history
        .iter()
        .filter(|prior| {
            let prior = prior.to_lowercase();
            !prior.is_empty() && (lower.contains(&prior) || prior.contains(&lower))
        })
        .count();
    if overlapping >= 2 {
        score += REPETITION_WEIGHT;
    }

    if observed_latency_ms > SLOW_RESPONSE_MS {
        score += LATENCY_WEIGHT;
    }

    let score = score.clamp(0.0, 1.0);

    StruggleSignal {
        score,
        matched_indicators,
        is_struggling: score > STRUGGLING_THRESHOLD,
        requires_intervention: score > INTERVENTION_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn three_indicators_score_point_nine() {
        let signal = detect("I'm stuck and confused and lost", &[], 0);
        assert_eq!(signal.matched_indicators.len(), 3);
        assert!((signal.score - 0.9).abs() < EPSILON);
        assert!(signal.is_struggling);
        assert!(signal.requires_intervention);
    }

    #[test]
    fn slow_response_alone_is_not_struggling() {
        let signal = detect("ok", &[], 40_000);
        assert!(signal.matched_indicators.is_empty());
        assert!((signal.score - 0.3).abs() < EPSILON);
        assert!(!signal.is_struggling);
        assert!(!signal.requires_intervention);
    }

    #[test]
    fn latency_at_exact_bound_does_not_fire() {
        let signal = detect("ok", &[], SLOW_RESPONSE_MS);
        assert!(signal.score.abs() < EPSILON);
    }

    #[test]
    fn repetition_requires_two_overlapping_priors() {
        let history = vec!["how do loops work".to_string()];
        let signal = detect("how do loops work", &history, 0);
        assert!(signal.score.abs() < EPSILON);

        let history = vec![
            "how do loops work".to_string(),
            "loops".to_string(),
        ];
        let signal = detect("how do loops work", &history, 0);
        assert!((signal.score - REPETITION_WEIGHT).abs() < EPSILON);
    }

    #[test]
    fn score_clamps_at_one() {
        let signal = detect(
            "I'm stuck, confused, lost, frustrated and it's not working, why? I give up",
            &["stuck".to_string(), "why".to_string()],
            40_000,
        );
        assert!((signal.score - 1.0).abs() < EPSILON);
        assert!(signal.requires_intervention);
    }

    #[test]
    fn indicators_are_counted_once_each() {
        let signal = detect("error error error", &[], 0);
        assert_eq!(signal.matched_indicators, vec!["error".to_string()]);
        assert!((signal.score - 0.3).abs() < EPSILON);
    }

    #[test]
    fn two_indicators_cross_struggling_threshold() {
        let signal = detect("why does my for loop throw an error", &[], 0);
        assert_eq!(signal.matched_indicators.len(), 2);
        assert!((signal.score - 0.6).abs() < EPSILON);
        assert!(signal.is_struggling);
        assert!(!signal.requires_intervention);
    }

    #[test]
    fn detection_is_repeatable() {
        let history = vec!["what is a dict".to_string()];
        let a = detect("I'm lost", &history, 10);
        let b = detect("I'm lost", &history, 10);
        assert_eq!(a.score, b.score);
        assert_eq!(a.matched_indicators, b.matched_indicators);
    }
}

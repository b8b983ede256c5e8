//! Keyword-rule message classification.
//!
//! A deterministic rule chain, not a weighted classifier: groups are
//! evaluated in a fixed priority order and the first group containing a
//! matching phrase wins. Unmatched messages fall through to triage.

use crate::types::AgentId;

/// Phrases that mark a concept-explanation request. Checked first.
const CONCEPT_PHRASES: &[&str] = &[
    "what is",
    "what are",
    "explain",
    "how does",
    "how do i",
    "difference between",
    "concept",
    "tell me about",
];

/// Phrases that mark a debugging request.
const DEBUG_PHRASES: &[&str] = &[
    "error",
    "bug",
    "broken",
    "not working",
    "doesn't work",
    "exception",
    "traceback",
    "crash",
    "fix my",
    "debug",
];

/// Phrases that mark an exercise or quiz request.
const EXERCISE_PHRASES: &[&str] = &[
    "practice",
    "exercise",
    "quiz",
    "challenge",
    "test me",
    "give me a problem",
];

/// Phrases that mark a progress inquiry.
const PROGRESS_PHRASES: &[&str] = &[
    "progress",
    "how am i doing",
    "stats",
    "mastery",
    "streak",
    "track my",
];

/// Phrases that mark a code-review request.
const CODE_REVIEW_PHRASES: &[&str] = &[
    "review",
    "feedback on",
    "improve my code",
    "refactor",
    "code quality",
];

/// Priority-ordered rule table. Order is part of the contract: a message
/// containing both a concept phrase and a debug phrase classifies as
/// concepts because that group is evaluated first.
const RULES: &[(AgentId, &[&str])] = &[
    (AgentId::Concepts, CONCEPT_PHRASES),
    (AgentId::Debug, DEBUG_PHRASES),
    (AgentId::Exercise, EXERCISE_PHRASES),
    (AgentId::Progress, PROGRESS_PHRASES),
    (AgentId::CodeReview, CODE_REVIEW_PHRASES),
];

/// Classifies a message into an [`AgentId`].
///
/// Pure and total: the same text always yields the same agent, and no
/// input fails. Empty or whitespace-only text is rejected upstream by the
/// coordinator before it gets here.
pub fn classify(text: &str) -> AgentId {
    let lower = text.to_lowercase();

    for (agent, phrases) in RULES {
        if phrases.iter().any(|phrase| lower.contains(phrase)) {
            return *agent;
        }
    }

    AgentId::Triage
}

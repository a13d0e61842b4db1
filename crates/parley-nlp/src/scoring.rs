//! Threshold checks over classifier output.

use parley_core::Classification;

/// Best score for `intent` among the classifications that meet `min_score`,
/// or `0.0` when none does.
pub fn intent_score(classifications: &[Classification], intent: &str, min_score: f64) -> f64 {
    classifications
        .iter()
        .filter(|c| c.intent == intent && c.score >= min_score)
        .map(|c| c.score)
        .fold(0.0, f64::max)
}

/// Whether any classification for `intent` reaches `min_score`.
///
/// Unlike [`intent_score`] this is true for a zero threshold met by a zero
/// score.
pub fn matches(classifications: &[Classification], intent: &str, min_score: f64) -> bool {
    classifications
        .iter()
        .any(|c| c.intent == intent && c.score >= min_score)
}

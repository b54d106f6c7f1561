//! Selection of the best candidate among lookalike search results.

use crate::gateway::Candidate;
use crate::similarity::score;

/// The chosen candidate and its similarity score.
///
/// `candidate` is `None` when the list is empty or no candidate scores above
/// `0.0`; the score is then `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub candidate: Option<Candidate>,
    pub score: f64,
}

/// Scores every candidate against `business_name` and keeps the one with the
/// strictly greatest score. Ties keep the earlier candidate, so the result
/// only depends on input order. A candidate must score above `0.0` to be
/// selected.
#[must_use]
pub fn select_best_match(business_name: &str, candidates: &[Candidate]) -> MatchResult {
    let mut best: Option<(&Candidate, f64)> = None;

    for candidate in candidates {
        let similarity = score(business_name, &candidate.display_name);
        tracing::debug!(
            candidate = %candidate.display_name,
            similarity,
            "scored candidate"
        );
        if similarity > best.map_or(0.0, |(_, best_score)| best_score) {
            best = Some((candidate, similarity));
        }
    }

    match best {
        Some((candidate, score)) => MatchResult {
            candidate: Some(candidate.clone()),
            score,
        },
        None => MatchResult {
            candidate: None,
            score: 0.0,
        },
    }
}

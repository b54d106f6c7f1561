//! Resolution records produced for each input query.
//!
//! A query always yields exactly one [`ResolvedBusiness`]. When resolution
//! stops early the record carries a [`ResolutionError`] instead of provider
//! data, so a batch never aborts because of one query.

use serde::Serialize;
use thiserror::Error;

/// Score below which a match is flagged as low confidence.
pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Score at or above which a match is accepted without caveat.
pub const ACCEPTED_THRESHOLD: f64 = 0.7;

/// Why a query could not be fully resolved.
///
/// The display strings are part of the output format (CSV `error` column,
/// Markdown status cells) and must stay stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Error)]
pub enum ResolutionError {
    /// The text search failed or returned no candidates.
    #[error("No match found")]
    #[serde(rename = "No match found")]
    NoMatch,

    /// Candidates existed but none could be selected.
    #[error("No good match found")]
    #[serde(rename = "No good match found")]
    NoGoodMatch,

    /// A candidate was selected but its detail fetch failed.
    #[error("Could not retrieve details")]
    #[serde(rename = "Could not retrieve details")]
    DetailsUnavailable,
}

/// Confidence band of a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchConfidence {
    /// `score < 0.5`: the result may be a different business.
    Low,
    /// `0.5 <= score < 0.7`: plausible, but worth verifying.
    Moderate,
    /// `score >= 0.7`.
    Accepted,
}

impl MatchConfidence {
    #[must_use]
    pub fn from_score(score: f64) -> Self {
        if score < LOW_CONFIDENCE_THRESHOLD {
            Self::Low
        } else if score < ACCEPTED_THRESHOLD {
            Self::Moderate
        } else {
            Self::Accepted
        }
    }
}

/// The output unit for one query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBusiness {
    pub query: String,
    pub place_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub maps_url: String,
    pub formatted_address: Option<String>,
    pub match_score: Option<f64>,
    pub error: Option<ResolutionError>,
}

impl ResolvedBusiness {
    /// A record for a query that failed before any candidate was chosen.
    #[must_use]
    pub fn unmatched(query: &str, error: ResolutionError) -> Self {
        Self {
            query: query.to_owned(),
            place_id: String::new(),
            name: String::new(),
            rating: None,
            rating_count: None,
            maps_url: String::new(),
            formatted_address: None,
            match_score: None,
            error: Some(error),
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// Confidence band of the match, if a score was recorded.
    #[must_use]
    pub fn confidence(&self) -> Option<MatchConfidence> {
        self.match_score.map(MatchConfidence::from_score)
    }

    /// Name to show in reports: the resolved name, or the raw query when no
    /// name was obtained.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.query
        } else {
            &self.name
        }
    }
}

/// A provider review mapped into a uniform shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewRecord {
    pub author: String,
    /// Raw provider value; `0` when the provider omitted it.
    pub rating: i32,
    pub relative_time: String,
    pub text: String,
    pub publish_time: Option<String>,
}

/// One query's resolved business together with the reviews fetched for it.
///
/// Reviews stay attached to the record they belong to, so two businesses that
/// share a display name never have their reviews merged.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub business: ResolvedBusiness,
    pub reviews: Vec<ReviewRecord>,
}

/// Success/failure counts for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    #[must_use]
    pub fn from_resolutions(resolutions: &[Resolution]) -> Self {
        let total = resolutions.len();
        let successful = resolutions
            .iter()
            .filter(|r| r.business.is_success())
            .count();
        Self {
            total,
            successful,
            failed: total - successful,
        }
    }
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Total: {}, Successful: {}, Failed: {}",
            self.total, self.successful, self.failed
        )
    }
}

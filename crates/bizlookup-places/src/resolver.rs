//! Query-to-record resolution.
//!
//! One query runs search → match → detail fetch → assemble → review
//! normalization. Every failure ends in a [`ResolutionError`] recorded on the
//! output record; nothing propagates to the caller, so a batch always yields
//! one [`Resolution`] per query.

use bizlookup_core::{MatchConfidence, Resolution, ResolutionError, ResolvedBusiness};
use futures::stream::{self, StreamExt};

use crate::gateway::{Candidate, DetailRecord, PlacesGateway};
use crate::matching::{select_best_match, MatchResult};
use crate::query::extract_business_name;
use crate::reviews::parse_reviews;

/// Candidates requested per text search.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Name recorded when the chosen candidate has no display name.
const UNKNOWN_NAME: &str = "Unknown";

/// Drives resolution against a [`PlacesGateway`].
///
/// Holds no per-query state; one instance can resolve any number of queries,
/// concurrently or not.
pub struct Resolver<G> {
    gateway: G,
    page_size: u32,
}

impl<G: PlacesGateway> Resolver<G> {
    #[must_use]
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Resolves one query into exactly one record plus its reviews.
    ///
    /// The review list is empty unless `include_reviews` is set and the
    /// provider returned reviews for the chosen place.
    #[tracing::instrument(skip(self), fields(place_id))]
    pub async fn resolve(&self, query: &str, include_reviews: bool) -> Resolution {
        let candidates = match self.gateway.search_text(query, self.page_size).await {
            Ok(candidates) if !candidates.is_empty() => candidates,
            Ok(_) => {
                tracing::warn!("no results found");
                return failed(query, ResolutionError::NoMatch);
            }
            Err(e) => {
                tracing::warn!(error = %e, "text search failed");
                return failed(query, ResolutionError::NoMatch);
            }
        };

        let business_name = extract_business_name(query);
        tracing::debug!(
            business_name = %business_name,
            candidates = candidates.len(),
            "finding best match"
        );

        let MatchResult { candidate, score } = select_best_match(&business_name, &candidates);
        let Some(candidate) = candidate else {
            tracing::warn!("could not find a good match");
            return failed(query, ResolutionError::NoGoodMatch);
        };
        tracing::Span::current().record("place_id", candidate.id.as_str());
        report_confidence(&candidate, score);

        let details = match self
            .gateway
            .get_details(&candidate.id, include_reviews)
            .await
        {
            Ok(details) => details,
            Err(e) => {
                tracing::warn!(error = %e, name = %candidate.display_name, "could not get details");
                return Resolution {
                    business: details_unavailable(query, candidate),
                    reviews: Vec::new(),
                };
            }
        };

        let reviews = if include_reviews {
            details.reviews.as_deref().map(parse_reviews).unwrap_or_default()
        } else {
            Vec::new()
        };
        if !reviews.is_empty() {
            tracing::info!(reviews = reviews.len(), "found reviews");
        }

        Resolution {
            business: assemble(query, candidate, score, details),
            reviews,
        }
    }

    /// Resolves every query, running at most `concurrency` at a time.
    ///
    /// Results come back in input order regardless of completion order, and
    /// one query's failure never affects another's.
    pub async fn resolve_batch(
        &self,
        queries: &[String],
        include_reviews: bool,
        concurrency: usize,
    ) -> Vec<Resolution> {
        let total = queries.len();
        stream::iter(queries.iter().enumerate())
            .map(|(index, query)| async move {
                tracing::info!(position = index + 1, total, query = %query, "processing query");
                self.resolve(query, include_reviews).await
            })
            .buffered(concurrency.max(1))
            .collect()
            .await
    }
}

fn failed(query: &str, error: ResolutionError) -> Resolution {
    Resolution {
        business: ResolvedBusiness::unmatched(query, error),
        reviews: Vec::new(),
    }
}

fn candidate_name(candidate: &Candidate) -> String {
    if candidate.display_name.is_empty() {
        UNKNOWN_NAME.to_owned()
    } else {
        candidate.display_name.clone()
    }
}

fn report_confidence(candidate: &Candidate, score: f64) {
    tracing::info!(
        name = %candidate.display_name,
        score,
        "best match"
    );
    match MatchConfidence::from_score(score) {
        MatchConfidence::Low => tracing::warn!(
            score,
            "low match score, result may not be accurate"
        ),
        MatchConfidence::Moderate => tracing::warn!(
            score,
            "moderate match score, please verify result"
        ),
        MatchConfidence::Accepted => {}
    }
}

/// Record for a matched candidate whose detail fetch failed: keeps what the
/// search already told us.
fn details_unavailable(query: &str, candidate: Candidate) -> ResolvedBusiness {
    ResolvedBusiness {
        query: query.to_owned(),
        name: candidate_name(&candidate),
        place_id: candidate.id,
        rating: None,
        rating_count: None,
        maps_url: String::new(),
        formatted_address: candidate.formatted_address,
        match_score: None,
        error: Some(ResolutionError::DetailsUnavailable),
    }
}

/// Detail values win over search values whenever both exist.
fn assemble(query: &str, candidate: Candidate, score: f64, details: DetailRecord) -> ResolvedBusiness {
    let name = details.name.unwrap_or_else(|| candidate_name(&candidate));
    ResolvedBusiness {
        query: query.to_owned(),
        place_id: candidate.id,
        name,
        rating: details.rating,
        rating_count: details.rating_count,
        maps_url: details.maps_url.unwrap_or_default(),
        formatted_address: details.formatted_address.or(candidate.formatted_address),
        match_score: Some(score),
        error: None,
    }
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;

//! The places provider seam used by the resolver.
//!
//! [`PlacesGateway`] exposes the two read-only provider operations. The HTTP
//! implementation is [`crate::PlacesClient`]; tests substitute in-memory
//! gateways.

use std::future::Future;

use crate::error::PlacesError;
use crate::types::{Place, PlaceDetails};

/// A loosely-matching search result, before confidence scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    /// Empty when the provider returned no display name.
    pub display_name: String,
    pub formatted_address: Option<String>,
}

impl From<Place> for Candidate {
    fn from(place: Place) -> Self {
        Self {
            id: place.id,
            display_name: place.display_name.map(|n| n.text).unwrap_or_default(),
            formatted_address: place.formatted_address,
        }
    }
}

/// Authoritative fields fetched for one place id.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub maps_url: Option<String>,
    pub formatted_address: Option<String>,
    /// Raw review payloads; `None` when reviews were not requested or the
    /// place has none.
    pub reviews: Option<Vec<serde_json::Value>>,
}

impl From<PlaceDetails> for DetailRecord {
    fn from(details: PlaceDetails) -> Self {
        Self {
            name: details
                .display_name
                .map(|n| n.text)
                .filter(|s| !s.is_empty()),
            rating: details.rating,
            rating_count: details.user_rating_count,
            maps_url: details.google_maps_uri,
            formatted_address: details.formatted_address,
            reviews: details.reviews,
        }
    }
}

/// Read-only access to a places provider.
///
/// Implementations hold only transport configuration and must be safe to
/// share between concurrent resolutions.
pub trait PlacesGateway: Sync {
    /// Runs a fuzzy text search and returns up to `page_size` candidates.
    fn search_text(
        &self,
        query: &str,
        page_size: u32,
    ) -> impl Future<Output = Result<Vec<Candidate>, PlacesError>> + Send;

    /// Fetches authoritative details for `place_id`, including the
    /// provider's small review sample when `include_reviews` is set.
    fn get_details(
        &self,
        place_id: &str,
        include_reviews: bool,
    ) -> impl Future<Output = Result<DetailRecord, PlacesError>> + Send;
}

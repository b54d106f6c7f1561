use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::json;

use super::*;
use crate::error::PlacesError;

/// In-memory gateway: `candidates = None` makes search fail, a place id
/// missing from `details` makes the detail fetch fail.
#[derive(Default)]
struct FakeGateway {
    candidates: Option<Vec<Candidate>>,
    details: HashMap<String, DetailRecord>,
    search_calls: AtomicUsize,
    detail_calls: AtomicUsize,
}

impl PlacesGateway for FakeGateway {
    async fn search_text(&self, _query: &str, _page_size: u32) -> Result<Vec<Candidate>, PlacesError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.candidates.clone().ok_or(PlacesError::ServerError {
            status: 503,
            url: "fake://search".to_owned(),
        })
    }

    async fn get_details(
        &self,
        place_id: &str,
        _include_reviews: bool,
    ) -> Result<DetailRecord, PlacesError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.details
            .get(place_id)
            .cloned()
            .ok_or(PlacesError::UnexpectedStatus {
                status: 404,
                url: format!("fake://places/{place_id}"),
            })
    }
}

fn candidate(id: &str, name: &str, address: Option<&str>) -> Candidate {
    Candidate {
        id: id.to_owned(),
        display_name: name.to_owned(),
        formatted_address: address.map(str::to_owned),
    }
}

fn detail(name: &str) -> DetailRecord {
    DetailRecord {
        name: Some(name.to_owned()),
        rating: Some(4.7),
        rating_count: Some(1_234),
        maps_url: Some("https://maps.google.com/?cid=42".to_owned()),
        formatted_address: Some("123 S Main St, Salt Lake City, UT 84101, USA".to_owned()),
        reviews: Some(vec![
            json!({ "authorAttribution": { "displayName": "Pat" }, "rating": 5, "originalText": { "text": "Great!" } }),
            json!(42),
            json!({ "rating": 4 }),
        ]),
    }
}

fn acme_gateway() -> FakeGateway {
    let mut details = HashMap::new();
    details.insert("acme-1".to_owned(), detail("Acme Lighting"));
    FakeGateway {
        candidates: Some(vec![
            candidate("acme-1", "Acme Lighting", Some("search address")),
            candidate("acme-2", "Acme Lighting Co of Utah", None),
        ]),
        details,
        ..FakeGateway::default()
    }
}

#[tokio::test]
async fn resolves_best_candidate_with_details() {
    let resolver = Resolver::new(acme_gateway());
    let resolution = resolver.resolve("Acme Lighting Salt Lake City", true).await;
    let business = resolution.business;

    assert!(business.is_success());
    assert_eq!(business.query, "Acme Lighting Salt Lake City");
    assert_eq!(business.place_id, "acme-1");
    assert_eq!(business.name, "Acme Lighting");
    assert_eq!(business.rating, Some(4.7));
    assert_eq!(business.rating_count, Some(1_234));
    assert_eq!(business.maps_url, "https://maps.google.com/?cid=42");
    assert_eq!(
        business.formatted_address.as_deref(),
        Some("123 S Main St, Salt Lake City, UT 84101, USA"),
        "detail address must win over search address"
    );
    assert!((business.match_score.unwrap() - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn malformed_review_is_skipped_without_failing_resolution() {
    let resolver = Resolver::new(acme_gateway());
    let resolution = resolver.resolve("Acme Lighting Salt Lake City", true).await;
    assert!(resolution.business.is_success());
    assert_eq!(resolution.reviews.len(), 2);
    assert_eq!(resolution.reviews[0].author, "Pat");
    assert_eq!(resolution.reviews[1].author, "Anonymous");
}

#[tokio::test]
async fn reviews_are_dropped_when_not_requested() {
    let resolver = Resolver::new(acme_gateway());
    let resolution = resolver.resolve("Acme Lighting Salt Lake City", false).await;
    assert!(resolution.business.is_success());
    assert!(resolution.reviews.is_empty());
}

#[tokio::test]
async fn empty_search_is_no_match_without_detail_call() {
    let gateway = FakeGateway {
        candidates: Some(Vec::new()),
        ..FakeGateway::default()
    };
    let resolver = Resolver::new(gateway);
    let resolution = resolver.resolve("NoSuchPlace9999XYZ", true).await;

    assert_eq!(resolution.business.error, Some(ResolutionError::NoMatch));
    assert!(resolution.business.place_id.is_empty());
    assert!(resolution.reviews.is_empty());
    assert_eq!(resolver.gateway().detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn search_failure_is_no_match() {
    let resolver = Resolver::new(FakeGateway::default());
    let resolution = resolver.resolve("Acme Lighting", true).await;
    assert_eq!(resolution.business.error, Some(ResolutionError::NoMatch));
    assert!(resolution.business.rating.is_none());
    assert!(resolution.business.maps_url.is_empty());
    assert_eq!(resolver.gateway().detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn detail_failure_keeps_search_fields() {
    let gateway = FakeGateway {
        candidates: Some(vec![candidate("acme-1", "Acme Lighting", Some("1 Main St"))]),
        ..FakeGateway::default()
    };
    let resolver = Resolver::new(gateway);
    let resolution = resolver.resolve("Acme Lighting in SLC", true).await;
    let business = resolution.business;

    assert_eq!(business.error, Some(ResolutionError::DetailsUnavailable));
    assert_eq!(business.place_id, "acme-1");
    assert_eq!(business.name, "Acme Lighting");
    assert_eq!(business.formatted_address.as_deref(), Some("1 Main St"));
    assert!(business.rating.is_none());
    assert!(business.rating_count.is_none());
    assert!(business.maps_url.is_empty());
    assert!(resolution.reviews.is_empty());
}

#[tokio::test]
async fn all_zero_scores_are_no_good_match_without_detail_call() {
    let mut details = HashMap::new();
    details.insert("x-1".to_owned(), detail("Xyz"));
    let gateway = FakeGateway {
        candidates: Some(vec![candidate("x-1", "Xyz", None)]),
        details,
        ..FakeGateway::default()
    };
    let resolver = Resolver::new(gateway);
    let resolution = resolver.resolve("Bob", true).await;

    assert_eq!(resolution.business.error, Some(ResolutionError::NoGoodMatch));
    assert_eq!(
        resolution.business.error.map(|e| e.to_string()).as_deref(),
        Some("No good match found")
    );
    assert!(resolution.business.place_id.is_empty());
    assert!(resolution.business.match_score.is_none());
    assert!(resolution.reviews.is_empty());
    assert_eq!(resolver.gateway().detail_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unnamed_candidate_is_recorded_as_unknown() {
    let gateway = FakeGateway {
        candidates: Some(vec![candidate("p-1", "", None)]),
        ..FakeGateway::default()
    };
    let resolver = Resolver::new(gateway);
    // Empty extracted name is a substring of the empty display name.
    let resolution = resolver.resolve(", Provo", true).await;
    assert_eq!(resolution.business.error, Some(ResolutionError::DetailsUnavailable));
    assert_eq!(resolution.business.name, "Unknown");
}

#[tokio::test]
async fn detail_without_name_falls_back_to_candidate_name() {
    let mut record = detail("ignored");
    record.name = None;
    record.formatted_address = None;
    let mut details = HashMap::new();
    details.insert("acme-1".to_owned(), record);
    let gateway = FakeGateway {
        candidates: Some(vec![candidate("acme-1", "Acme Lighting", Some("search address"))]),
        details,
        ..FakeGateway::default()
    };
    let resolver = Resolver::new(gateway);
    let business = resolver.resolve("Acme Lighting", false).await.business;
    assert_eq!(business.name, "Acme Lighting");
    assert_eq!(business.formatted_address.as_deref(), Some("search address"));
}

#[tokio::test]
async fn low_confidence_match_is_still_resolved() {
    let mut details = HashMap::new();
    details.insert("x-1".to_owned(), detail("XYZ Corp"));
    let gateway = FakeGateway {
        candidates: Some(vec![candidate("x-1", "XYZ Corp", None)]),
        details,
        ..FakeGateway::default()
    };
    let resolver = Resolver::new(gateway);
    let business = resolver.resolve("Acme Lighting", false).await.business;
    assert!(business.is_success());
    assert_eq!(
        business.confidence(),
        Some(MatchConfidence::Low),
        "score was {:?}",
        business.match_score
    );
}

#[tokio::test]
async fn resolve_is_idempotent() {
    let resolver = Resolver::new(acme_gateway());
    let first = resolver.resolve("Acme Lighting Salt Lake City", true).await;
    let second = resolver.resolve("Acme Lighting Salt Lake City", true).await;
    assert_eq!(first, second);
    assert_eq!(
        format!("{:?}", first.business),
        format!("{:?}", second.business)
    );
}

/// Gateway whose responses depend on the query and finish in reverse order.
struct EchoGateway;

impl PlacesGateway for EchoGateway {
    async fn search_text(&self, query: &str, _page_size: u32) -> Result<Vec<Candidate>, PlacesError> {
        if query.starts_with("missing") {
            return Ok(Vec::new());
        }
        let delay = 40u64.saturating_sub(query.len() as u64 * 5);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        Ok(vec![candidate(query, query, None)])
    }

    async fn get_details(
        &self,
        place_id: &str,
        _include_reviews: bool,
    ) -> Result<DetailRecord, PlacesError> {
        Ok(DetailRecord {
            name: Some(place_id.to_owned()),
            rating: None,
            rating_count: None,
            maps_url: None,
            formatted_address: None,
            reviews: None,
        })
    }
}

#[tokio::test]
async fn batch_preserves_input_order_under_concurrency() {
    let queries: Vec<String> = ["a", "bb", "missing one", "ccc", "dddd"]
        .iter()
        .map(|s| (*s).to_owned())
        .collect();
    let resolver = Resolver::new(EchoGateway);
    let results = resolver.resolve_batch(&queries, false, 4).await;

    let order: Vec<&str> = results.iter().map(|r| r.business.query.as_str()).collect();
    assert_eq!(order, vec!["a", "bb", "missing one", "ccc", "dddd"]);
    assert_eq!(results[2].business.error, Some(ResolutionError::NoMatch));
    assert!(results
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != 2)
        .all(|(_, r)| r.business.is_success()));
}

#[tokio::test]
async fn batch_with_zero_concurrency_still_runs() {
    let queries = vec!["a".to_owned()];
    let resolver = Resolver::new(EchoGateway);
    let results = resolver.resolve_batch(&queries, false, 0).await;
    assert_eq!(results.len(), 1);
}

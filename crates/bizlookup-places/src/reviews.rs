//! Normalization of raw provider reviews into [`ReviewRecord`]s.

use bizlookup_core::ReviewRecord;
use serde::Deserialize;

use crate::types::RawReview;

/// Author shown when the provider gives no attribution.
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// Maps a raw review into a [`ReviewRecord`]. Never fails.
///
/// Text comes from `originalText` when present, otherwise from `text`, and
/// is empty when neither exists. Missing author is [`ANONYMOUS_AUTHOR`],
/// missing rating is `0`. An empty `publishTime` is treated as absent.
#[must_use]
pub fn normalize_review(raw: RawReview) -> ReviewRecord {
    let author = raw
        .author_attribution
        .and_then(|a| a.display_name)
        .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_owned());

    let text = raw
        .original_text
        .or(raw.text)
        .map(|t| t.text)
        .unwrap_or_default();

    ReviewRecord {
        author,
        rating: raw.rating.unwrap_or(0),
        relative_time: raw.relative_publish_time_description.unwrap_or_default(),
        text,
        publish_time: raw.publish_time.filter(|s| !s.is_empty()),
    }
}

/// Normalizes every review payload in order, skipping entries that are not
/// review-shaped (not an object, or a field of the wrong type).
///
/// A skipped entry is logged and never affects its siblings.
#[must_use]
pub fn parse_reviews(raw_reviews: &[serde_json::Value]) -> Vec<ReviewRecord> {
    raw_reviews
        .iter()
        .enumerate()
        .filter_map(|(index, value)| match RawReview::deserialize(value) {
            Ok(raw) => Some(normalize_review(raw)),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed review");
                None
            }
        })
        .collect()
}

//! Output writers for a finished batch.
//!
//! Each format has a pure `render_*` function returning the document as a
//! string and a `write_*` wrapper that persists it.

mod csv_file;
mod markdown;
mod reviews_text;

use std::path::Path;

use anyhow::Context;

pub(crate) use csv_file::write_csv;
pub(crate) use markdown::write_markdown;
pub(crate) use reviews_text::write_reviews;

/// Review text longer than this many characters is cut and suffixed `...`.
const REVIEW_TEXT_LIMIT: usize = 500;

fn truncate_review(text: &str) -> String {
    if text.chars().count() > REVIEW_TEXT_LIMIT {
        let mut cut: String = text.chars().take(REVIEW_TEXT_LIMIT).collect();
        cut.push_str("...");
        cut
    } else {
        text.to_owned()
    }
}

/// Most stars ever drawn for one rating.
const MAX_STARS: usize = 5;

/// `symbol` repeated `count` times, clamped to `0..=5`.
fn stars(symbol: &str, count: i32) -> String {
    symbol.repeat(usize::try_from(count).unwrap_or(0).min(MAX_STARS))
}

fn write_file(path: &Path, contents: &str) -> anyhow::Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use bizlookup_core::{Resolution, ResolutionError, ResolvedBusiness, ReviewRecord};

    use super::*;

    pub(super) fn review(author: &str, rating: i32, text: &str) -> ReviewRecord {
        ReviewRecord {
            author: author.to_owned(),
            rating,
            relative_time: "a week ago".to_owned(),
            text: text.to_owned(),
            publish_time: None,
        }
    }

    pub(super) fn success(query: &str, name: &str, score: f64, reviews: Vec<ReviewRecord>) -> Resolution {
        Resolution {
            business: ResolvedBusiness {
                query: query.to_owned(),
                place_id: format!("id-{name}"),
                name: name.to_owned(),
                rating: Some(4.6),
                rating_count: Some(1_234),
                maps_url: "https://maps.google.com/?cid=7".to_owned(),
                formatted_address: Some("123 S Main St, Salt Lake City, UT".to_owned()),
                match_score: Some(score),
                error: None,
            },
            reviews,
        }
    }

    pub(super) fn failure(query: &str) -> Resolution {
        Resolution {
            business: ResolvedBusiness::unmatched(query, ResolutionError::NoMatch),
            reviews: Vec::new(),
        }
    }

    #[test]
    fn short_text_is_untouched() {
        assert_eq!(truncate_review("fine"), "fine");
    }

    #[test]
    fn long_text_is_cut_at_limit() {
        let text = "é".repeat(REVIEW_TEXT_LIMIT + 10);
        let cut = truncate_review(&text);
        assert!(cut.ends_with("..."));
        assert_eq!(cut.chars().count(), REVIEW_TEXT_LIMIT + 3);
    }

    #[test]
    fn text_at_limit_is_not_suffixed() {
        let text = "a".repeat(REVIEW_TEXT_LIMIT);
        assert_eq!(truncate_review(&text), text);
    }

    #[test]
    fn negative_star_count_renders_nothing() {
        assert_eq!(stars("★", -2), "");
        assert_eq!(stars("★", 3), "★★★");
    }

    #[test]
    fn oversized_star_count_is_capped() {
        assert_eq!(stars("★", 7), "★★★★★");
        assert_eq!(stars("★", i32::MAX), "★★★★★");
    }
}

//! Extraction of the business-name fragment from a raw "name + location" query.

/// Separators that introduce the location part of a query, in priority order.
const LOCATION_SEPARATORS: [&str; 2] = [" in ", ", "];

/// Location words dropped from queries without a separator.
///
/// Entries may span several words; a multi-word entry is removed only when
/// the whole phrase appears as consecutive tokens.
const LOCATION_STOPWORDS: &[&str] = &["city", "ut", "utah", "slc", "salt lake city"];

/// Returns the case-folded business-name portion of `query`.
///
/// If the query contains `" in "` (checked first) or `", "`, everything
/// before the first occurrence is kept, trimmed, even when that is empty.
/// Otherwise location stopwords are removed token by token; when that would
/// leave nothing, the whole trimmed, case-folded query is returned.
#[must_use]
pub fn extract_business_name(query: &str) -> String {
    let folded = query.to_lowercase();

    for separator in LOCATION_SEPARATORS {
        if let Some((head, _)) = folded.split_once(separator) {
            return head.trim().to_owned();
        }
    }

    let tokens: Vec<&str> = folded.split_whitespace().collect();
    let kept = strip_location_tokens(&tokens);
    if kept.is_empty() {
        return folded.trim().to_owned();
    }
    kept.join(" ")
}

/// Removes stopword phrases, preferring the longest phrase at each position.
fn strip_location_tokens<'a>(tokens: &[&'a str]) -> Vec<&'a str> {
    let phrases: Vec<Vec<&str>> = LOCATION_STOPWORDS
        .iter()
        .map(|p| p.split_whitespace().collect())
        .collect();

    let mut kept = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        let matched = phrases
            .iter()
            .filter(|words| tokens[i..].starts_with(words))
            .map(Vec::len)
            .max();
        if let Some(len) = matched {
            i += len;
        } else {
            kept.push(tokens[i]);
            i += 1;
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_in_separator() {
        assert_eq!(
            extract_business_name("Acme Lighting in Salt Lake City"),
            "acme lighting"
        );
    }

    #[test]
    fn splits_on_comma_separator() {
        assert_eq!(extract_business_name("Acme Lighting, SLC"), "acme lighting");
    }

    #[test]
    fn in_separator_takes_priority_over_comma() {
        assert_eq!(
            extract_business_name("Lights, Camera in Provo, UT"),
            "lights, camera"
        );
    }

    #[test]
    fn separator_match_is_case_insensitive() {
        assert_eq!(extract_business_name("Acme Lighting IN Ogden"), "acme lighting");
    }

    #[test]
    fn only_first_occurrence_is_used() {
        assert_eq!(
            extract_business_name("Acme, Inc, Salt Lake City"),
            "acme"
        );
    }

    #[test]
    fn strips_single_word_location_tokens() {
        assert_eq!(
            extract_business_name("Utah Holiday Lighting SLC"),
            "holiday lighting"
        );
    }

    #[test]
    fn strips_multi_word_location_phrase() {
        assert_eq!(
            extract_business_name("Acme Lighting Salt Lake City"),
            "acme lighting"
        );
    }

    #[test]
    fn partial_phrase_keeps_remaining_tokens() {
        // "salt lake" alone is not a stopword; only "city" is dropped.
        assert_eq!(
            extract_business_name("Salt Lake Roofing City"),
            "salt lake roofing"
        );
    }

    #[test]
    fn stopwords_match_whole_tokens_only() {
        assert_eq!(extract_business_name("Utahns Bakery"), "utahns bakery");
    }

    #[test]
    fn collapses_whitespace_between_tokens() {
        assert_eq!(extract_business_name("  Acme   Lighting  "), "acme lighting");
    }

    #[test]
    fn all_stopwords_falls_back_to_folded_query() {
        assert_eq!(extract_business_name("Salt Lake City UT"), "salt lake city ut");
    }

    #[test]
    fn empty_head_before_separator_yields_empty_name() {
        assert_eq!(extract_business_name(", Acme Lighting"), "");
        assert_eq!(extract_business_name("  in Provo"), "");
    }

    #[test]
    fn empty_query_returns_empty() {
        assert_eq!(extract_business_name(""), "");
    }
}

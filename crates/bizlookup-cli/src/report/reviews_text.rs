use std::path::Path;

use bizlookup_core::Resolution;

use super::{stars, truncate_review};

const RULE_WIDTH: usize = 80;

/// Renders the plain-text review report: a banner, the provider-limit note,
/// then one section per business that has reviews, in input order.
pub(crate) fn render_reviews(results: &[Resolution]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = format!("{rule}\nRECENT REVIEWS\n{rule}\n\n");
    out.push_str("NOTE: The places API does not provide access to all reviews.\n");
    out.push_str("Only a small, non-paginated set (~5 reviews) is returned.\n\n");

    for resolution in results.iter().filter(|r| !r.reviews.is_empty()) {
        out.push_str(&format!(
            "\n{rule}\nBusiness: {}\n{rule}\n\n",
            resolution.business.display_name()
        ));
        for (i, review) in resolution.reviews.iter().enumerate() {
            out.push_str(&format!("Review #{}:\n", i + 1));
            out.push_str(&format!("  Author: {}\n", review.author));
            out.push_str(&format!(
                "  Rating: {} ({}/5)\n",
                stars("★", review.rating),
                review.rating
            ));
            out.push_str(&format!("  Time: {}\n", review.relative_time));
            if !review.text.is_empty() {
                out.push_str(&format!("  Review: {}\n", truncate_review(&review.text)));
            }
            out.push('\n');
        }
    }
    out
}

/// # Errors
///
/// Returns an error if the file cannot be written.
pub(crate) fn write_reviews(path: &Path, results: &[Resolution]) -> anyhow::Result<()> {
    super::write_file(path, &render_reviews(results))
}

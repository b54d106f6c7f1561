use std::path::Path;

use bizlookup_core::{BatchSummary, MatchConfidence, Resolution, ResolvedBusiness};
use chrono::{DateTime, Local};

use super::{stars, truncate_review};

const RATING_STAR: &str = "⭐";

/// Renders the full Markdown report for a batch.
pub(crate) fn render_markdown(results: &[Resolution], generated_at: &DateTime<Local>) -> String {
    let summary = BatchSummary::from_resolutions(results);
    let mut out = String::from("# Places Business Lookup Results\n\n");
    out.push_str(&format!(
        "**Generated:** {}\n\n---\n\n",
        generated_at.format("%B %d, %Y at %I:%M %p")
    ));

    out.push_str("## Summary\n\n");
    out.push_str(&format!("- **Total Queries:** {}\n", summary.total));
    out.push_str(&format!("- **Successful:** {}\n", summary.successful));
    out.push_str(&format!("- **Failed:** {}\n\n", summary.failed));

    out.push_str("## Business Overview\n\n");
    out.push_str("| Business | Rating | Reviews | Match Score | Status |\n");
    out.push_str("|----------|--------|---------|-------------|--------|\n");
    for resolution in results {
        out.push_str(&overview_row(&resolution.business));
    }
    out.push_str("\n---\n\n## Detailed Results\n\n");

    for (i, resolution) in results.iter().enumerate() {
        render_detail(&mut out, i + 1, resolution);
    }

    out.push_str("## Notes\n\n");
    out.push_str("- This report was generated using the Places API (v1)\n");
    out.push_str("- Review data is limited to what the API provides (typically ~5 reviews per business)\n");
    out.push_str("- Ratings and review counts are current as of the generation date\n");
    out.push_str("- Follow the map links to view full business listings\n");
    out
}

/// # Errors
///
/// Returns an error if the file cannot be written.
pub(crate) fn write_markdown(
    path: &Path,
    results: &[Resolution],
    generated_at: &DateTime<Local>,
) -> anyhow::Result<()> {
    super::write_file(path, &render_markdown(results, generated_at))
}

fn overview_row(business: &ResolvedBusiness) -> String {
    if let Some(error) = business.error {
        return format!("| {} | - | - | - | ❌ {error} |\n", escape_cell(&business.query));
    }
    let score = business
        .match_score
        .map_or_else(|| "N/A".to_owned(), |s| format!("{s:.2}"));
    let status = match business.confidence() {
        Some(MatchConfidence::Low) => "⚠️ Low Match",
        Some(MatchConfidence::Moderate) => "⚠️ Verify",
        Some(MatchConfidence::Accepted) | None => "✅",
    };
    format!(
        "| {} | {} | {} | {score} | {status} |\n",
        escape_cell(business.display_name()),
        rating_cell(business.rating),
        group_thousands(business.rating_count.unwrap_or(0)),
    )
}

fn render_detail(out: &mut String, position: usize, resolution: &Resolution) {
    let business = &resolution.business;
    out.push_str(&format!("### {position}. {}\n\n", business.display_name()));

    if let Some(error) = business.error {
        out.push_str(&format!("**Status:** ❌ {error}\n\n"));
        out.push_str(&format!("**Query:** `{}`\n\n---\n\n", business.query));
        return;
    }

    out.push_str(&format!("**Query:** `{}`\n\n", business.query));

    if let Some(score) = business.match_score {
        match MatchConfidence::from_score(score) {
            MatchConfidence::Low => out.push_str(&format!(
                "⚠️ **Warning:** Low match score ({score:.2}) - This may not be the correct business\n\n"
            )),
            MatchConfidence::Moderate => out.push_str(&format!(
                "⚠️ **Note:** Moderate match score ({score:.2}) - Please verify this is the correct business\n\n"
            )),
            MatchConfidence::Accepted => {}
        }
        out.push_str(&format!("**Match Score:** {score:.2}/1.00\n\n"));
    }

    let count = group_thousands(business.rating_count.unwrap_or(0));
    match business.rating {
        Some(rating) => out.push_str(&format!(
            "**Rating:** {}**{rating:.1}/5** ({count} reviews)\n\n",
            star_prefix(rating)
        )),
        None => out.push_str(&format!("**Rating:** - ({count} reviews)\n\n")),
    }

    if let Some(address) = &business.formatted_address {
        out.push_str(&format!("**Address:** {address}\n\n"));
    }
    if !business.maps_url.is_empty() {
        out.push_str(&format!("**Map:** [View on Maps]({})\n\n", business.maps_url));
    }
    if !business.place_id.is_empty() {
        out.push_str(&format!("**Place ID:** `{}`\n\n", business.place_id));
    }

    if !resolution.reviews.is_empty() {
        out.push_str(&format!("#### Recent Reviews ({})\n\n", resolution.reviews.len()));
        out.push_str(
            "*Note: The API returns only a limited set of reviews (~5). Full review export is not available.*\n\n",
        );
        for (j, review) in resolution.reviews.iter().enumerate() {
            out.push_str(&format!("**Review {}** by **{}**\n\n", j + 1, review.author));
            out.push_str(&format!(
                "{} **{}/5** • *{}*\n\n",
                stars(RATING_STAR, review.rating),
                review.rating,
                review.relative_time
            ));
            if !review.text.is_empty() {
                out.push_str(&format!("> {}\n\n", escape_cell(&truncate_review(&review.text))));
            }
        }
    }

    out.push_str("---\n\n");
}

fn rating_cell(rating: Option<f64>) -> String {
    rating.map_or_else(
        || "-".to_owned(),
        |r| format!("{}{r:.1}/5", star_prefix(r)),
    )
}

/// One star per whole rating point, followed by a space when non-empty.
fn star_prefix(rating: f64) -> String {
    let whole = (1..=5).take_while(|point| f64::from(*point) <= rating).count();
    if whole == 0 {
        String::new()
    } else {
        format!("{} ", RATING_STAR.repeat(whole))
    }
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn group_thousands(value: u32) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

use std::path::Path;

use anyhow::Context;
use bizlookup_core::Resolution;

/// Renders one CSV row per resolution, in input order. Absent values are
/// empty cells; the header follows the record's field order.
///
/// # Errors
///
/// Returns an error if a record cannot be serialized.
pub(crate) fn render_csv(results: &[Resolution]) -> anyhow::Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for resolution in results {
        writer.serialize(&resolution.business)?;
    }
    if results.is_empty() {
        writer.write_record(HEADER)?;
    }
    let data = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

const HEADER: [&str; 9] = [
    "query",
    "place_id",
    "name",
    "rating",
    "rating_count",
    "maps_url",
    "formatted_address",
    "match_score",
    "error",
];

/// # Errors
///
/// Returns an error if rendering fails or the file cannot be written.
pub(crate) fn write_csv(path: &Path, results: &[Resolution]) -> anyhow::Result<()> {
    let rendered = render_csv(results)?;
    super::write_file(path, &rendered)
}

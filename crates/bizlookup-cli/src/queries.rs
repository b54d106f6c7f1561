//! Query collection from command-line arguments and query files.

use std::path::Path;

use anyhow::Context;

/// Extracts queries from query-file contents: one trimmed query per line,
/// skipping blank lines and lines starting with `#`.
pub(crate) fn parse_queries(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Reads and parses a query file.
///
/// # Errors
///
/// Returns an error if the file cannot be read as UTF-8 text.
pub(crate) fn load_queries_from_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read queries file {}", path.display()))?;
    let queries = parse_queries(&contents);
    tracing::info!(count = queries.len(), path = %path.display(), "loaded queries from file");
    Ok(queries)
}

/// Argument queries first, then file queries. Blank arguments are dropped.
///
/// # Errors
///
/// Propagates [`load_queries_from_file`] failures.
pub(crate) fn collect_queries(args: &[String], file: Option<&Path>) -> anyhow::Result<Vec<String>> {
    let mut queries: Vec<String> = args
        .iter()
        .filter(|q| !q.trim().is_empty())
        .cloned()
        .collect();
    if let Some(path) = file {
        queries.extend(load_queries_from_file(path)?);
    }
    Ok(queries)
}

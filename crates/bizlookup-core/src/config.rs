use crate::app_config::LookupConfig;
use crate::ConfigError;

/// Environment variable holding the places provider credential.
pub const API_KEY_VAR: &str = "GOOGLE_PLACES_API_KEY";

/// Load lookup configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric value cannot be parsed.
pub fn load_lookup_config() -> Result<LookupConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_lookup_config_from_env()
}

/// Load lookup configuration from environment variables already in the process.
///
/// Unlike [`load_lookup_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a numeric value cannot be parsed.
pub fn load_lookup_config_from_env() -> Result<LookupConfig, ConfigError> {
    build_lookup_config(|key| std::env::var(key))
}

/// Build lookup configuration using the provided env-var lookup function.
///
/// The API key is optional at this stage because the CLI may supply it as a
/// flag; callers check it with [`LookupConfig::require_api_key`].
fn build_lookup_config<F>(lookup: F) -> Result<LookupConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let api_key = lookup(API_KEY_VAR).ok().filter(|k| !k.trim().is_empty());
    let places_base_url = or_default(
        "BIZLOOKUP_PLACES_BASE_URL",
        "https://places.googleapis.com/v1",
    );
    let log_level = or_default("BIZLOOKUP_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("BIZLOOKUP_REQUEST_TIMEOUT_SECS", "10")?;
    let max_retries = parse_u32("BIZLOOKUP_MAX_RETRIES", "3")?;
    let retry_backoff_base_ms = parse_u64("BIZLOOKUP_RETRY_BACKOFF_BASE_MS", "1000")?;
    let inter_request_delay_ms = parse_u64("BIZLOOKUP_INTER_REQUEST_DELAY_MS", "500")?;
    let max_concurrent_queries = parse_usize("BIZLOOKUP_MAX_CONCURRENT_QUERIES", "1")?;
    let search_page_size = parse_u32("BIZLOOKUP_SEARCH_PAGE_SIZE", "5")?;
    let user_agent = or_default("BIZLOOKUP_USER_AGENT", "bizlookup/0.1 (places-lookup)");

    Ok(LookupConfig {
        api_key,
        places_base_url,
        log_level,
        request_timeout_secs,
        max_retries,
        retry_backoff_base_ms,
        inter_request_delay_ms,
        max_concurrent_queries,
        search_page_size,
        user_agent,
    })
}

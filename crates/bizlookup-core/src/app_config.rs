use crate::config::API_KEY_VAR;
use crate::ConfigError;

/// Runtime configuration for a lookup run.
///
/// Built from the environment by [`crate::config::load_lookup_config`]; the
/// CLI then applies flag overrides on top.
#[derive(Clone)]
pub struct LookupConfig {
    pub api_key: Option<String>,
    pub places_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    pub inter_request_delay_ms: u64,
    pub max_concurrent_queries: usize,
    pub search_page_size: u32,
    pub user_agent: String,
}

impl std::fmt::Debug for LookupConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookupConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("places_base_url", &self.places_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field("inter_request_delay_ms", &self.inter_request_delay_ms)
            .field("max_concurrent_queries", &self.max_concurrent_queries)
            .field("search_page_size", &self.search_page_size)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl LookupConfig {
    /// Returns the provider API key, or an error naming the variable that
    /// should have supplied it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] when no key was configured via
    /// the environment or a flag override.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(API_KEY_VAR.to_string()))
    }
}

use thiserror::Error;

/// Errors returned by the places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// HTTP 429 from the provider.
    #[error("rate limited by places API (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    /// HTTP 500, 502, 503 or 504.
    #[error("places API server error {status} from {url}")]
    ServerError { status: u16, url: String },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// A 2xx detail response carrying neither an id nor a display name.
    #[error("empty place details for {place_id}")]
    EmptyDetails { place_id: String },

    #[error("invalid places base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

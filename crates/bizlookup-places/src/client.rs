//! HTTP client for the Places API (v1).
//!
//! Wraps `reqwest` with API-key headers, field masks, status classification,
//! shared request throttling and retry with back-off. Implements
//! [`PlacesGateway`] so the resolver never sees HTTP details.

use std::time::Duration;

use bizlookup_core::LookupConfig;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::error::PlacesError;
use crate::gateway::{Candidate, DetailRecord, PlacesGateway};
use crate::retry::retry_with_backoff;
use crate::throttle::RequestThrottle;
use crate::types::{PlaceDetails, SearchTextRequest, SearchTextResponse};

pub const DEFAULT_BASE_URL: &str = "https://places.googleapis.com/v1";
const DEFAULT_USER_AGENT: &str = "bizlookup/0.1 (places-lookup)";
const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";
const SEARCH_FIELD_MASK: &str = "places.id,places.displayName,places.formattedAddress";
const DETAIL_FIELDS: &[&str] = &[
    "id",
    "displayName",
    "rating",
    "userRatingCount",
    "googleMapsUri",
    "formattedAddress",
];
const SEARCH_LANGUAGE: &str = "en";

/// Client for the Places API.
///
/// Use [`PlacesClient::new`] for production, [`PlacesClient::from_config`]
/// when a [`LookupConfig`] is at hand, or [`PlacesClient::with_base_url`] to
/// point at a mock server in tests. Retries default to 3 with a 1 s back-off
/// base; throttling is off unless configured.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
    max_retries: u32,
    backoff_base_ms: u64,
    throttle: RequestThrottle,
}

impl PlacesClient {
    /// Creates a client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not an absolute URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        Self::build(api_key, timeout_secs, base_url, DEFAULT_USER_AGENT)
    }

    /// Creates a client from runtime configuration.
    ///
    /// `api_key` is passed separately because the CLI may override the
    /// configured key with a flag.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::with_base_url`].
    pub fn from_config(config: &LookupConfig, api_key: &str) -> Result<Self, PlacesError> {
        let client = Self::build(
            api_key,
            config.request_timeout_secs,
            &config.places_base_url,
            &config.user_agent,
        )?
        .with_retry_policy(config.max_retries, config.retry_backoff_base_ms)
        .with_min_request_interval(Duration::from_millis(config.inter_request_delay_ms));
        Ok(client)
    }

    fn build(
        api_key: &str,
        timeout_secs: u64,
        base_url: &str,
        user_agent: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;

        let trimmed = base_url.trim_end_matches('/');
        let parsed = Url::parse(trimmed).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if parsed.cannot_be_a_base() {
            return Err(PlacesError::InvalidBaseUrl {
                base_url: base_url.to_owned(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url: trimmed.to_owned(),
            max_retries: 3,
            backoff_base_ms: 1_000,
            throttle: RequestThrottle::disabled(),
        })
    }

    /// Sets the number of retries after the first failure and the back-off
    /// base in milliseconds. `max_retries = 0` disables retries.
    #[must_use]
    pub fn with_retry_policy(mut self, max_retries: u32, backoff_base_ms: u64) -> Self {
        self.max_retries = max_retries;
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Enforces a minimum spacing between the start of any two requests made
    /// through this client, retries included.
    #[must_use]
    pub fn with_min_request_interval(mut self, interval: Duration) -> Self {
        self.throttle = RequestThrottle::new(interval);
        self
    }

    /// `{base}/places:searchText`
    fn search_url(&self) -> String {
        format!("{}/places:searchText", self.base_url)
    }

    /// `{base}/places/{place_id}?fields=...`, with the id encoded as a single
    /// path segment.
    fn details_url(&self, place_id: &str, include_reviews: bool) -> Result<Url, PlacesError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| PlacesError::InvalidBaseUrl {
            base_url: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        url.path_segments_mut()
            .map_err(|()| PlacesError::InvalidBaseUrl {
                base_url: self.base_url.clone(),
                reason: "URL cannot be used as a base".to_owned(),
            })?
            .pop_if_empty()
            .push("places")
            .push(place_id);

        let mut fields = DETAIL_FIELDS.join(",");
        if include_reviews {
            fields.push_str(",reviews");
        }
        url.query_pairs_mut().append_pair("fields", &fields);
        Ok(url)
    }

    /// Classifies the HTTP status and parses the body as `T`.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::RateLimited`] for 429.
    /// - [`PlacesError::ServerError`] for 500, 502, 503, 504.
    /// - [`PlacesError::UnexpectedStatus`] for any other non-2xx status.
    /// - [`PlacesError::Http`] if the body cannot be read.
    /// - [`PlacesError::Deserialize`] if the body does not match `T`.
    async fn read_json<T: DeserializeOwned>(
        response: Response,
        context: &str,
    ) -> Result<T, PlacesError> {
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(0);
            return Err(PlacesError::RateLimited { retry_after_secs });
        }

        if matches!(status.as_u16(), 500 | 502 | 503 | 504) {
            return Err(PlacesError::ServerError {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        if !status.is_success() {
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

impl PlacesGateway for PlacesClient {
    async fn search_text(&self, query: &str, page_size: u32) -> Result<Vec<Candidate>, PlacesError> {
        let url = self.search_url();
        let context = format!("searchText(query={query})");

        tracing::debug!(query, page_size, "searching places");
        let response: SearchTextResponse =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                let context = context.clone();
                async move {
                    self.throttle.acquire().await;
                    let payload = SearchTextRequest {
                        text_query: query,
                        page_size,
                        language_code: SEARCH_LANGUAGE,
                    };
                    let response = self
                        .client
                        .post(&url)
                        .header(API_KEY_HEADER, &self.api_key)
                        .header(FIELD_MASK_HEADER, SEARCH_FIELD_MASK)
                        .json(&payload)
                        .send()
                        .await?;
                    Self::read_json(response, &context).await
                }
            })
            .await?;

        Ok(response.places.into_iter().map(Candidate::from).collect())
    }

    async fn get_details(
        &self,
        place_id: &str,
        include_reviews: bool,
    ) -> Result<DetailRecord, PlacesError> {
        let url = self.details_url(place_id, include_reviews)?;
        let context = format!("getPlace(id={place_id})");

        tracing::debug!(place_id, include_reviews, "fetching place details");
        let details: PlaceDetails =
            retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
                let url = url.clone();
                let context = context.clone();
                async move {
                    self.throttle.acquire().await;
                    let response = self
                        .client
                        .get(url)
                        .header(API_KEY_HEADER, &self.api_key)
                        .send()
                        .await?;
                    Self::read_json(response, &context).await
                }
            })
            .await?;

        if details.id.is_none() && details.display_name.is_none() {
            return Err(PlacesError::EmptyDetails {
                place_id: place_id.to_owned(),
            });
        }
        Ok(DetailRecord::from(details))
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;

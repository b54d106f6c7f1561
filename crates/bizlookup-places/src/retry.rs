//! Retry with exponential back-off and jitter for the places client.
//!
//! [`retry_with_backoff`] wraps any fallible async operation and retries on
//! transient errors: network failures, HTTP 429 and the 5xx statuses the
//! provider uses for temporary outages. Everything else is returned
//! immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::PlacesError;

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:**
/// - Network-level failures: timeout, connection refused/reset.
/// - [`PlacesError::RateLimited`]: HTTP 429.
/// - [`PlacesError::ServerError`]: HTTP 500, 502, 503, 504.
///
/// **Not retriable:**
/// - [`PlacesError::UnexpectedStatus`]: 4xx and other statuses; the request
///   itself is wrong (bad key, unknown place id).
/// - [`PlacesError::Deserialize`]: malformed response.
/// - [`PlacesError::EmptyDetails`]: the provider has nothing for that id.
/// - [`PlacesError::InvalidBaseUrl`]: configuration error.
pub(crate) fn is_retriable(err: &PlacesError) -> bool {
    match err {
        PlacesError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        PlacesError::RateLimited { .. } | PlacesError::ServerError { .. } => true,
        PlacesError::UnexpectedStatus { .. }
        | PlacesError::Deserialize { .. }
        | PlacesError::EmptyDetails { .. }
        | PlacesError::InvalidBaseUrl { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// Back-off schedule with `backoff_base_ms = 1_000`:
///
/// | Attempt | Sleep before next attempt        |
/// |---------|----------------------------------|
/// | 1       | 1 000 ms × 2⁰ ± 25 % jitter     |
/// | 2       | 1 000 ms × 2¹ ± 25 % jitter     |
/// | 3       | 1 000 ms × 2² ± 25 % jitter     |
///
/// Delay is capped at 60 s. Non-retriable errors are returned immediately.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, PlacesError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlacesError>>,
{
    const MAX_DELAY_MS: u64 = 60_000;
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let delay_ms = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "places API transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

//! Optional retry with exponential backoff for ads API requests.
//!
//! Runs default to `max_retries = 0`: every request is attempted exactly once
//! and a failure is recorded against its page or ad. Raising the retry count
//! only affects transient errors; decode failures and 4xx responses are
//! returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::ScraperError;

/// Returns `true` if `err` is a transient condition worth retrying.
///
/// Retriable: 429, 5xx, and network-level timeouts or connection failures.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::RateLimited { .. } => true,
        ScraperError::UnexpectedStatus { status, .. } => *status >= 500,
        ScraperError::Http(e) => e.is_timeout() || e.is_connect(),
        ScraperError::Deserialize { .. }
        | ScraperError::InvalidBaseUrl { .. }
        | ScraperError::InvalidHeader { .. } => false,
    }
}

/// Wait before the retry that follows failed attempt `attempt` (0-based).
///
/// Exponential `backoff_base_secs * 2^attempt`, but never shorter than the
/// server's `Retry-After` on a 429.
fn backoff_delay(err: &ScraperError, attempt: u32, backoff_base_secs: u64) -> Duration {
    let exponential = backoff_base_secs.saturating_mul(1u64 << attempt.min(62));
    let secs = match err {
        ScraperError::RateLimited {
            retry_after_secs, ..
        } => exponential.max(*retry_after_secs),
        _ => exponential,
    };
    Duration::from_secs(secs)
}

/// Executes `operation`, retrying transient errors up to `max_retries` times.
///
/// The wait before the n-th retry is `backoff_base_secs * 2^(n-1)` seconds,
/// raised to the `Retry-After` value when the server was rate limiting.
/// With `max_retries = 0` the operation runs once and its result is returned
/// as-is.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_secs: u64,
    mut operation: F,
) -> Result<T, ScraperError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ScraperError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };
        if !is_retriable(&err) || attempt >= max_retries {
            return Err(err);
        }

        let delay = backoff_delay(&err, attempt, backoff_base_secs);
        tracing::warn!(
            attempt,
            max_retries,
            delay_secs = delay.as_secs(),
            error = %err,
            "transient ads API error, retrying after backoff"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

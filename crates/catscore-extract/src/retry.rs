//! Retry with exponential back-off and jitter for extraction calls.

use std::future::Future;
use std::time::Duration;

use crate::error::ExtractError;

/// Upper bound on a single back-off sleep.
const MAX_DELAY_MS: u64 = 30_000;

/// Timeouts, connect failures and 5xx responses are transient; everything
/// else would fail the same way on a second attempt.
pub(crate) fn is_retriable(err: &ExtractError) -> bool {
    match err {
        ExtractError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ExtractError::Upstream { .. }
        | ExtractError::Deserialize { .. }
        | ExtractError::InvalidRequest(_)
        | ExtractError::InvalidBaseUrl { .. } => false,
    }
}

/// Sleep before retry `attempt` (1-based): `base × 2^(attempt-1)`, capped,
/// then scaled by a random factor in `[0.75, 1.25)`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn backoff_delay_ms(backoff_base_ms: u64, attempt: u32) -> u64 {
    let computed = backoff_base_ms.saturating_mul(1u64 << attempt.saturating_sub(1).min(10));
    let capped = computed.min(MAX_DELAY_MS);
    (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64
}

/// Runs `operation`, retrying up to `max_retries` more times on transient
/// errors.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ExtractError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ExtractError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = backoff_delay_ms(backoff_base_ms, attempt);
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "extraction service transient error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

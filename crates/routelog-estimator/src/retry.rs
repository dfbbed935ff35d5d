//! Retry with exponential back-off and jitter for estimator calls.
//!
//! Only transient failures are retried. Every call costs quota, so anything
//! that would fail the same way twice is returned immediately.

use std::future::Future;
use std::time::Duration;

use crate::error::EstimatorError;

/// Longest single sleep between two estimator attempts, jitter included.
pub const MAX_BACKOFF: Duration = Duration::from_secs(10);

/// Returns `true` for errors that are worth retrying after a back-off delay.
///
/// **Retriable:** network timeouts and connection failures, HTTP 429, HTTP 5xx.
///
/// **Not retriable:** other statuses (bad key, bad request), malformed bodies,
/// empty answers, and configuration problems.
pub(crate) fn is_retriable(err: &EstimatorError) -> bool {
    match err {
        EstimatorError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        EstimatorError::RateLimited => true,
        EstimatorError::UnexpectedStatus { status } => *status >= 500,
        EstimatorError::Deserialize { .. }
        | EstimatorError::EmptyResponse
        | EstimatorError::InvalidBaseUrl { .. } => false,
    }
}

/// Sleep before retry number `attempt` (1-based): `backoff_base_ms × 2ⁿ⁻¹`
/// with ±25 % jitter, never longer than [`MAX_BACKOFF`].
fn backoff_delay(attempt: u32, backoff_base_ms: u64) -> Duration {
    let exp = attempt.saturating_sub(1).min(10);
    let nominal = backoff_base_ms.saturating_mul(1u64 << exp);
    let jitter = rand::random::<f64>() * 0.5 + 0.75;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let jittered_ms = (nominal as f64 * jitter) as u64;
    Duration::from_millis(jittered_ms).min(MAX_BACKOFF)
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, EstimatorError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, EstimatorError>>,
{
    let mut retries = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if is_retriable(&err) && retries < max_retries => err,
            Err(err) => return Err(err),
        };
        retries += 1;
        let delay = backoff_delay(retries, backoff_base_ms);
        tracing::warn!(
            retry = retries,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "estimator lookup failed transiently; backing off"
        );
        tokio::time::sleep(delay).await;
    }
}

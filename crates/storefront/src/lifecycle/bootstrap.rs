//! Startup retry around the document store connection.
//!
//! Runs once, before any service exists. Requests are never retried.

use crate::config::RetryPolicy;
use std::future::Future;
use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

#[derive(Debug, Error)]
#[error("Gave up after {attempts} attempt(s): {last}")]
pub struct RetryExhausted<E>
where
    E: std::error::Error + 'static,
{
    pub attempts: u32,
    #[source]
    pub last: E,
}

/// Calls `connect` until it succeeds, sleeping `policy.delay` between attempts.
///
/// `connect` receives the 1-based attempt number. With `policy.max_attempts == None`
/// this only returns once a connection succeeds.
pub async fn connect_with_retry<F, Fut, T, E>(
    policy: RetryPolicy,
    mut connect: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + 'static,
{
    let mut attempt = 0u32;
    loop {
        attempt = attempt.saturating_add(1);
        debug!(attempt, max_attempts = ?policy.max_attempts, "Connecting");

        match connect(attempt).await {
            Ok(connection) => {
                if attempt > 1 {
                    info!(attempt, "Connected after retry");
                }
                return Ok(connection);
            }
            Err(last) if policy.max_attempts.is_some_and(|max| attempt >= max) => {
                error!(attempt, error = %last, "Giving up on connection");
                return Err(RetryExhausted {
                    attempts: attempt,
                    last,
                });
            }
            Err(e) => {
                warn!(
                    attempt,
                    error = %e,
                    delay_ms = policy.delay.as_millis(),
                    "Connection failed, retrying"
                );
                sleep(policy.delay).await;
            }
        }
    }
}

//! Bounded retry with a fixed delay between attempts

use std::future::Future;
use tokio::time::sleep;
use tracing::warn;

use crate::shared::types::RetryPolicy;

/// Retry an async operation under `policy`, sleeping the fixed delay between attempts.
///
/// `op` receives the 1-based attempt number. The last error is returned once
/// `max_attempts` is exhausted.
pub async fn retry_with_policy<F, Fut, T, E>(policy: RetryPolicy, mut op: F) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < max_attempts => {
                warn!("Attempt {}/{} failed: {}", attempt, max_attempts, e);
                sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

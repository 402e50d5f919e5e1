use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry `operation` with exponential backoff. Transient infrastructure
/// errors are recovered here, at the component boundary; the final error is
/// returned once `attempts` runs out. Sleeps `base_delay * 2^attempt`
/// between tries.
pub async fn retry_with_backoff<T, E, Fut, F>(
    mut operation: F,
    attempts: u32,
    base_delay: Duration,
    operation_name: &str,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) if attempt + 1 < attempts => {
                warn!(%error, attempt = attempt + 1, "Retrying {}", operation_name);
                sleep(base_delay * 2u32.saturating_pow(attempt)).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}

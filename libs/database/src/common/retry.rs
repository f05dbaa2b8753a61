use std::collections::hash_map::RandomState;
use std::future::Future;
use std::hash::BuildHasher;
use std::time::{Duration, SystemTime};
use tracing::{debug, warn};

/// Backoff policy for connection attempts made at startup
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry, in milliseconds
    pub initial_delay_ms: u64,
    /// Upper bound for any single delay, in milliseconds
    pub max_delay_ms: u64,
    /// Growth factor applied to the delay after each failure
    pub backoff_multiplier: f64,
    /// Scale each delay by a random factor in [0.5, 1.0)
    pub use_jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 100,
            max_delay_ms: 5000,
            backoff_multiplier: 2.0,
            use_jitter: true,
        }
    }
}

impl RetryConfig {
    /// Pause before retry number `retry` (1-based), capped at `max_delay_ms`.
    fn pause(&self, retry: u32) -> Duration {
        let factor = self.backoff_multiplier.powi(retry.saturating_sub(1) as i32);
        let capped = ((self.initial_delay_ms as f64 * factor) as u64).min(self.max_delay_ms);
        let ms = if self.use_jitter { jitter(capped) } else { capped };
        Duration::from_millis(ms)
    }
}

/// Run `operation` until it succeeds or `config.max_retries` retries are spent.
///
/// The error of the final attempt is returned unchanged.
///
/// ```ignore
/// use database::common::{retry_with_backoff, RetryConfig};
///
/// let config = RetryConfig { max_retries: 5, ..Default::default() };
/// let client = retry_with_backoff(|| database::mongodb::connect(&url), config).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, config: RetryConfig) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut retries = 0;

    loop {
        let err = match operation().await {
            Ok(value) => {
                if retries > 0 {
                    debug!(retries, "Connected after retrying");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if retries == config.max_retries {
            warn!(attempts = retries + 1, error = %err, "Giving up");
            return Err(err);
        }
        retries += 1;

        let pause = config.pause(retries);
        debug!(retry = retries, pause_ms = pause.as_millis() as u64, error = %err, "Attempt failed");
        tokio::time::sleep(pause).await;
    }
}

/// `delay` scaled by a pseudo-random factor in [0.5, 1.0)
fn jitter(delay: u64) -> u64 {
    let percent = 50 + RandomState::new().hash_one(SystemTime::now()) % 50;
    delay * percent / 100
}

use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Spaces out request starts by at least `min_interval`.
///
/// The lock is held across the sleep, so callers sharing one limiter are
/// served one at a time and each sees the timestamp left by the previous one.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl RateLimiter {
    #[must_use]
    pub const fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_request: Mutex::const_new(None),
        }
    }

    pub async fn wait(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                debug!("Rate limit: waiting {:?}", wait);
                tokio::time::sleep(wait).await;
            }
        }
        *last = Some(Instant::now());
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(crate::constants::intervals::JIKAN_MIN_INTERVAL)
    }
}

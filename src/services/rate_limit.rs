//! Fixed pacing between requests.

use std::time::Duration;

use tokio::sync::Mutex;

/// Sleeps a fixed interval before each fetch attempt.
///
/// The sleep happens while holding a shared gate, so callers running
/// concurrently are released one `delay` apart instead of all at once.
#[derive(Debug)]
pub struct RateLimiter {
    delay: Duration,
    gate: Mutex<()>,
}

impl RateLimiter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            gate: Mutex::new(()),
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Wait out the configured delay, queued behind any other waiter.
    pub async fn wait(&self) {
        if self.delay.is_zero() {
            return;
        }
        let _turn = self.gate.lock().await;
        tokio::time::sleep(self.delay).await;
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::from_millis(200)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    #[test]
    fn test_default_delay() {
        assert_eq!(RateLimiter::default().delay(), Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_wait_blocks_for_delay() {
        let limiter = RateLimiter::from_millis(30);
        let start = Instant::now();
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }

    #[tokio::test]
    async fn test_concurrent_waits_are_spaced() {
        let limiter = RateLimiter::from_millis(20);
        let start = Instant::now();

        let stamp = || async {
            limiter.wait().await;
            start.elapsed()
        };
        let (a, b, c) = tokio::join!(stamp(), stamp(), stamp());

        let mut released = [a, b, c];
        released.sort();
        assert!(released[0] >= Duration::from_millis(20));
        assert!(released[1] >= Duration::from_millis(40));
        assert!(released[2] >= Duration::from_millis(60));
    }

    #[tokio::test]
    async fn test_zero_delay_returns() {
        RateLimiter::from_millis(0).wait().await;
    }
}

//! Injectable latency policy for the record store.
//!
//! Demos can emulate a slow backend; tests run with no delay.

use std::time::Duration;

/// Fixed delay applied before every store operation settles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LatencyPolicy {
    delay: Duration,
}

impl LatencyPolicy {
    /// No added latency.
    pub const NONE: LatencyPolicy = LatencyPolicy {
        delay: Duration::ZERO,
    };

    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::fixed(Duration::from_millis(ms))
    }

    /// Suspend the caller for the configured delay.
    pub async fn wait(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_fixed_latency_waits() {
        let policy = LatencyPolicy::from_millis(500);
        let started = Instant::now();

        policy.wait().await;

        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_latency_returns_immediately() {
        let started = Instant::now();

        LatencyPolicy::NONE.wait().await;

        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(LatencyPolicy::default(), LatencyPolicy::NONE);
    }
}

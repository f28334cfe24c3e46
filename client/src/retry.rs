use std::time::Duration;

/// Exponential backoff shared by confirmation polling and snapshot re-reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total tries, the first one included. Treated as 1 when zero.
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub multiplier: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(8),
            multiplier: 2,
        }
    }
}

impl RetryPolicy {
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Wait before retry number `retry` (0 for the first retry).
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = self.multiplier.max(1).saturating_pow(retry);
        self.initial_backoff
            .saturating_mul(factor)
            .min(self.max_backoff)
    }

    /// Sleeps before the next try. Returns false once every attempt is spent,
    /// without sleeping.
    pub async fn pause(&self, attempt: u32) -> bool {
        if attempt.saturating_add(1) >= self.attempts() {
            return false;
        }
        tokio::time::sleep(self.backoff(attempt)).await;
        true
    }
}

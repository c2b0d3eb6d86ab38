use crate::config::StoreConfig;
use backon::BackoffBuilder;
use std::time::Duration;

/// Bounded retry with linearly growing delays: `step`, `2 * step`, ...
///
/// `max_attempts` counts the first attempt, so at most `max_attempts - 1`
/// delays are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub step: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, step: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            step,
        }
    }

    pub fn from_config(cfg: &StoreConfig) -> Self {
        Self::new(cfg.insert_max_attempts, cfg.retry_step())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_millis(200))
    }
}

impl BackoffBuilder for RetryPolicy {
    type Backoff = LinearBackoff;

    fn build(self) -> Self::Backoff {
        LinearBackoff {
            step: self.step,
            retries_left: self.max_attempts.saturating_sub(1),
            attempt: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LinearBackoff {
    step: Duration,
    retries_left: usize,
    attempt: u32,
}

impl Iterator for LinearBackoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.retries_left == 0 {
            return None;
        }
        self.retries_left -= 1;
        self.attempt += 1;
        Some(self.step * self.attempt)
    }
}

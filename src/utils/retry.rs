// Per-model retry policy for the fallback chain
// Author: kelexine (https://github.com/kelexine)

use crate::config::GeminiConfig;
use backoff::backoff::{Backoff, Constant};
use std::time::Duration;

/// How many times a single model is tried and how long to wait in between.
///
/// The delay is fixed: no exponential growth and no jitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts_per_model: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts_per_model: 2,
            delay: Duration::from_millis(2000),
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &GeminiConfig) -> Self {
        Self {
            attempts_per_model: config.attempts_per_model.max(1),
            delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Fresh backoff schedule for one model.
    pub fn backoff(&self) -> Constant {
        Constant::new(self.delay)
    }

    /// Delay to apply before `attempt` (zero-based). None for the first attempt.
    pub fn delay_before(&self, attempt: u32, backoff: &mut impl Backoff) -> Option<Duration> {
        if attempt == 0 {
            return None;
        }
        backoff.next_backoff()
    }
}

//! Bounded retry for flaky store calls (blocking, no runtime required).

use std::thread;
use std::time::Duration;

use crate::error::StoreError;

/// Fixed-interval retry. Transient errors are retried up to `attempts`
/// times with `delay` between tries; permanent errors fail immediately.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn run<T>(
        &self,
        mut op: impl FnMut() -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let attempts = self.attempts.max(1);
        let mut last = None;
        for attempt in 0..attempts {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    last = Some(err);
                    if attempt + 1 < attempts {
                        thread::sleep(self.delay);
                    }
                }
                Err(err) => return Err(err),
            }
        }
        // attempts >= 1, so at least one error was recorded
        Err(last.unwrap_or_else(|| StoreError::Network("no attempts made".into())))
    }
}

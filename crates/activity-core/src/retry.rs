//! Fixed-delay retry policy applied around each outbound call.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

/// How many times to try a call and how long to wait between tries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Pause between attempts
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(3),
        }
    }
}

/// Last error of a call that did not succeed
#[derive(Debug)]
pub struct RetryFailure<E> {
    /// Attempts actually made
    pub attempts: u32,
    /// True when the last error was retryable and the attempt budget ran out
    pub exhausted: bool,
    pub error: E,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Run `operation` until it succeeds, fails with an error `is_retryable`
    /// rejects, or the attempt budget is spent.
    ///
    /// `operation` receives the 1-based attempt number.
    pub fn run<T, E, F, P>(&self, mut operation: F, is_retryable: P) -> Result<T, RetryFailure<E>>
    where
        F: FnMut(u32) -> Result<T, E>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt) {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "call succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) => {
                    let retryable = is_retryable(&error);
                    if !retryable || attempt >= max_attempts {
                        return Err(RetryFailure {
                            attempts: attempt,
                            exhausted: retryable,
                            error,
                        });
                    }
                    warn!(
                        attempt,
                        max_attempts,
                        delay_ms = self.delay.as_millis() as u64,
                        error = %error,
                        "retryable failure, trying again"
                    );
                    if !self.delay.is_zero() {
                        thread::sleep(self.delay);
                    }
                    attempt += 1;
                }
            }
        }
    }
}

//! Bounded retry for blocking service calls.

use std::fmt::Display;
use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

/// Errors that know whether another attempt could succeed.
pub trait Retryable {
    /// `true` for failures worth retrying (network hiccups, overload).
    fn is_transient(&self) -> bool;
}

/// Attempt count and fixed delay between attempts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts including the first (default: 3)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Pause before each retry in milliseconds (default: 500)
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}
fn default_delay_ms() -> u64 {
    500
}

impl RetryPolicy {
    /// Policy that never sleeps; for tests and offline services.
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            delay_ms: 0,
        }
    }

    /// Delay between attempts.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

/// The last error after retries ran out, with the attempts spent.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryFailure<E> {
    /// Error from the final attempt
    pub error: E,
    /// Attempts made (1 when the error was not transient)
    pub attempts: u32,
}

/// Run `op` until it succeeds, fails permanently, or attempts run out.
///
/// `op` receives the 1-based attempt number. Non-transient errors return
/// immediately. A policy of zero attempts still makes one attempt.
pub fn with_retry<T, E, F>(
    policy: &RetryPolicy,
    label: &str,
    mut op: F,
) -> Result<T, RetryFailure<E>>
where
    E: Retryable + Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(error) if !error.is_transient() || attempt >= max_attempts => {
                return Err(RetryFailure {
                    error,
                    attempts: attempt,
                });
            }
            Err(error) => {
                warn!(
                    "{} failed (attempt {}/{}): {}; retrying in {}ms",
                    label, attempt, max_attempts, error, policy.delay_ms
                );
                if policy.delay_ms > 0 {
                    std::thread::sleep(policy.delay());
                }
                attempt += 1;
            }
        }
    }
}

//! Bounded constant-interval retry for rate-limit signals
//!
//! The hosted LLM backend throttles with HTTP 429; those calls are
//! retried a fixed number of times with a fixed wait. Every other error
//! fails the unit on its first attempt.

use std::time::Duration;

use crate::error::UnitError;

/// Retry `attempt_fn` while it fails with a rate-limit signal.
///
/// `max_attempts` counts total attempts, not retries: with
/// `max_attempts = 2` a single rate-limited call is retried once. Returns
/// the first success, or the final error on exhaustion / any
/// non-rate-limit error.
pub fn retry_rate_limited<T>(
    label: &str,
    max_attempts: u32,
    wait: Duration,
    mut attempt_fn: impl FnMut() -> Result<T, UnitError>,
) -> Result<T, UnitError> {
    let mut attempt = 1u32;
    loop {
        match attempt_fn() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < max_attempts && e.is_rate_limited() => {
                log::warn!(
                    "{label}: rate limited on attempt {attempt}/{max_attempts}, \
                     waiting {}s",
                    wait.as_secs()
                );
                attempt += 1;
                std::thread::sleep(wait);
            }
            Err(e) => return Err(e),
        }
    }
}

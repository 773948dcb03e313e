//! Retry backoff policy.
//!
//! Exponential backoff with a hard cap. Two extra attempts against a single
//! vendor API, so no jitter: there is no thundering herd to spread out.

use std::time::Duration;

/// Upper bound on any single backoff delay.
pub const MAX_BACKOFF: Duration = Duration::from_secs(8);

/// Delay before retry `attempt` (1-indexed): base * 2^(attempt-1), capped.
pub fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let pow = attempt.saturating_sub(1).min(16);
    base.saturating_mul(2_u32.saturating_pow(pow)).min(MAX_BACKOFF)
}

//! Client-side sliding-window rate limiter.
//!
//! Rejects quote requests locally before they reach the network, which
//! keeps a runaway retry loop (or a stuck key-repeat on the quote button)
//! from hammering the carrier and tripping their rate limit instead.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Sliding-window limiter: at most `limit` permits per `window`.
#[derive(Debug)]
pub struct SlidingWindowLimiter {
    limit: usize,
    window: Duration,
    timestamps: VecDeque<Instant>,
}

impl SlidingWindowLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        Self {
            limit,
            window,
            timestamps: VecDeque::with_capacity(limit),
        }
    }

    /// Limiter for `per_minute` requests per minute.
    pub fn per_minute(per_minute: usize) -> Self {
        Self::new(per_minute, Duration::from_secs(60))
    }

    /// Try to take a permit at `now`. Returns false when the window is full.
    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        while let Some(&front) = self.timestamps.front() {
            if now.duration_since(front) >= self.window {
                self.timestamps.pop_front();
            } else {
                break;
            }
        }
        if self.timestamps.len() >= self.limit {
            return false;
        }
        self.timestamps.push_back(now);
        true
    }

    /// Try to take a permit now.
    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    /// Permits currently consumed within the window.
    pub fn in_flight(&self) -> usize {
        self.timestamps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_enforced() {
        let mut limiter = SlidingWindowLimiter::new(3, Duration::from_secs(60));
        let now = Instant::now();
        assert!(limiter.try_acquire_at(now));
        assert!(limiter.try_acquire_at(now));
        assert!(limiter.try_acquire_at(now));
        assert!(!limiter.try_acquire_at(now));
    }

    #[test]
    fn test_window_slides() {
        let mut limiter = SlidingWindowLimiter::new(2, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.try_acquire_at(start));
        assert!(limiter.try_acquire_at(start + Duration::from_secs(30)));
        assert!(!limiter.try_acquire_at(start + Duration::from_secs(45)));

        // The first permit ages out after 60s.
        assert!(limiter.try_acquire_at(start + Duration::from_secs(61)));
        assert_eq!(limiter.in_flight(), 2);
    }
}

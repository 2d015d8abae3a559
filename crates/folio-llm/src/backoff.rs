//! Randomized exponential backoff between model call attempts

use rand::Rng;
use std::time::Duration;

/// Randomized exponential backoff calculator
///
/// The delay before retry `k` (1-based) is drawn uniformly from
/// `[min, ceiling(k)]`, where `ceiling(k) = clamp(min * 2^(k-1), min, max)`.
/// Every delay therefore lies within `[min, max]`.
#[derive(Clone, Debug)]
pub struct Backoff {
    min_delay: Duration,
    max_delay: Duration,
    attempt: u32,
}

impl Backoff {
    /// Create a new backoff sequence
    ///
    /// A `max_delay` below `min_delay` is raised to `min_delay`.
    pub fn new(min_delay: Duration, max_delay: Duration) -> Self {
        Self {
            min_delay,
            max_delay: max_delay.max(min_delay),
            attempt: 0,
        }
    }

    /// Upper bound of the delay drawn before retry `retry` (1-based)
    pub fn ceiling(&self, retry: u32) -> Duration {
        let min_ms = self.min_delay.as_millis();
        let max_ms = self.max_delay.as_millis();
        let shift = retry.saturating_sub(1).min(63);
        let exp_ms = min_ms.saturating_mul(1u128 << shift);
        let capped_ms = exp_ms.clamp(min_ms, max_ms);
        Duration::from_millis(capped_ms.min(u64::MAX as u128) as u64)
    }

    /// Get the next delay in the sequence
    pub fn next_delay(&mut self) -> Duration {
        self.attempt = self.attempt.saturating_add(1);

        let low = self.min_delay.as_millis().min(u64::MAX as u128) as u64;
        let high = self.ceiling(self.attempt).as_millis().min(u64::MAX as u128) as u64;

        Duration::from_millis(rand::thread_rng().gen_range(low..=high))
    }

    /// Number of delays generated so far
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Reset the attempt counter
    pub fn reset(&mut self) {
        self.attempt = 0;
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_doubles_then_caps() {
        let backoff = Backoff::default();
        assert_eq!(backoff.ceiling(1), Duration::from_secs(1));
        assert_eq!(backoff.ceiling(2), Duration::from_secs(2));
        assert_eq!(backoff.ceiling(3), Duration::from_secs(4));
        assert_eq!(backoff.ceiling(6), Duration::from_secs(32));
        assert_eq!(backoff.ceiling(7), Duration::from_secs(60));
        assert_eq!(backoff.ceiling(200), Duration::from_secs(60));
    }

    #[test]
    fn test_first_delay_is_minimum() {
        let mut backoff = Backoff::default();
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
        assert_eq!(backoff.attempt(), 1);
    }

    #[test]
    fn test_delays_stay_within_bounds() {
        let mut backoff = Backoff::default();
        for retry in 1..=20 {
            let delay = backoff.next_delay();
            assert!(delay >= Duration::from_secs(1), "retry {} too short: {:?}", retry, delay);
            assert!(delay <= backoff.ceiling(retry));
            assert!(delay <= Duration::from_secs(60));
        }
    }

    #[test]
    fn test_inverted_bounds_collapse() {
        let mut backoff = Backoff::new(Duration::from_millis(500), Duration::from_millis(100));
        assert_eq!(backoff.next_delay(), Duration::from_millis(500));
        assert_eq!(backoff.next_delay(), Duration::from_millis(500));
    }

    #[test]
    fn test_reset_clears_attempts() {
        let mut backoff = Backoff::default();
        backoff.next_delay();
        backoff.next_delay();
        assert_eq!(backoff.attempt(), 2);
        backoff.reset();
        assert_eq!(backoff.attempt(), 0);
    }
}

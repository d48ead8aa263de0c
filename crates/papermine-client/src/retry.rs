//! Explicit retry policy for completion calls

use rand::Rng;
use std::time::Duration;

/// Retry policy for transient completion failures.
///
/// An explicit value object rather than decorator-style control flow: the
/// backoff schedule is a pure function of the attempt number, so it can be
/// unit-tested without touching the network.
///
/// Defaults match a jittered exponential envelope of 1 s growing by 5x per
/// attempt, capped at 300 s, over 5 attempts total.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first (not "retries after")
    pub max_attempts: u32,

    /// Envelope for the delay after the first failed attempt
    pub initial_delay: Duration,

    /// Upper bound on the delay envelope
    pub max_delay: Duration,

    /// Envelope growth factor per attempt
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(300),
            multiplier: 5.0,
        }
    }
}

impl RetryPolicy {
    /// Policy with near-zero delays, for tests that exercise the retry loop
    pub fn immediate(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(1),
            multiplier: 1.0,
        }
    }

    /// The deterministic backoff envelope after the given failed attempt
    /// (1-based): `initial * multiplier^(attempt-1)`, capped at `max_delay`.
    pub fn envelope(&self, attempt: u32) -> Duration {
        let exp = attempt.saturating_sub(1);
        let scaled = self.initial_delay.as_secs_f64() * self.multiplier.powi(exp as i32);
        Duration::from_secs_f64(scaled.min(self.max_delay.as_secs_f64()))
    }

    /// The actual sleep after the given failed attempt: drawn uniformly from
    /// `[0, envelope]` so simultaneous clients do not retry in lockstep
    /// against the same endpoint.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let envelope = self.envelope(attempt);
        if envelope.is_zero() {
            return envelope;
        }
        let millis = rand::thread_rng().gen_range(0..=envelope.as_millis() as u64);
        Duration::from_millis(millis)
    }
}

//! Capped exponential backoff for the embedding call.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Backoff schedule between embedding attempts. Replaces a fixed-interval
/// retry sleep with an exponential one: `initial * multiplier^n`, capped at
/// `max_delay_ms`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackoffPolicy {
    /// Total attempts, including the first. Must be at least 1.
    pub max_attempts: u32,
    pub initial_delay_ms: u64,
    pub multiplier: f64,
    pub max_delay_ms: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay_ms: 200,
            multiplier: 2.0,
            max_delay_ms: 2_000,
        }
    }
}

impl BackoffPolicy {
    /// The sleeps taken after each failed attempt: one fewer than
    /// `max_attempts`, since the last failure is terminal.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        #[allow(clippy::cast_precision_loss)]
        let initial = self.initial_delay_ms as f64;
        let multiplier = self.multiplier;
        #[allow(clippy::cast_precision_loss)]
        let cap = self.max_delay_ms as f64;
        (0..self.max_attempts.saturating_sub(1)).map(move |attempt| {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let ms = (initial * multiplier.powi(attempt as i32)).min(cap) as u64;
            Duration::from_millis(ms)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_doubles() {
        let delays: Vec<u64> = BackoffPolicy::default()
            .delays()
            .map(|d| d.as_millis() as u64)
            .collect();
        assert_eq!(delays, vec![200, 400]);
    }

    #[test]
    fn delays_are_capped() {
        let policy = BackoffPolicy {
            max_attempts: 6,
            initial_delay_ms: 1_000,
            multiplier: 10.0,
            max_delay_ms: 3_000,
        };
        let delays: Vec<u64> = policy.delays().map(|d| d.as_millis() as u64).collect();
        assert_eq!(delays, vec![1_000, 3_000, 3_000, 3_000, 3_000]);
    }

    #[test]
    fn single_attempt_never_sleeps() {
        let policy = BackoffPolicy {
            max_attempts: 1,
            ..BackoffPolicy::default()
        };
        assert_eq!(policy.delays().count(), 0);
    }
}

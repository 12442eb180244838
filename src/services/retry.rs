//! Exponential backoff policy shared by event delivery and job execution.

use std::time::Duration;

use backoff::{ExponentialBackoff, ExponentialBackoffBuilder};

use crate::domain::models::RetryConfig;

pub fn backoff_policy(config: &RetryConfig) -> ExponentialBackoff {
    ExponentialBackoffBuilder::new()
        .with_initial_interval(Duration::from_millis(config.initial_backoff_ms))
        .with_max_interval(Duration::from_millis(config.max_backoff_ms))
        .with_max_elapsed_time(Some(Duration::from_millis(config.max_elapsed_ms)))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_uses_config() {
        let config = RetryConfig {
            initial_backoff_ms: 50,
            max_backoff_ms: 500,
            max_elapsed_ms: 2_000,
        };
        let policy = backoff_policy(&config);
        assert_eq!(policy.initial_interval, Duration::from_millis(50));
        assert_eq!(policy.max_interval, Duration::from_millis(500));
        assert_eq!(policy.max_elapsed_time, Some(Duration::from_millis(2_000)));
    }
}

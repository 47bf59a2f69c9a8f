use serde::{Deserialize, Serialize};

/// Backoff for the call stream reconnect loop.
///
/// The first retry waits `base_delay_ms`; each further attempt doubles the
/// wait up to `max_delay_ms`. `max_attempts: None` retries forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconnectPolicy {
    pub base_delay_ms: u32,
    pub max_delay_ms: u32,
    pub max_attempts: Option<u32>,
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self {
            base_delay_ms: 5_000,
            max_delay_ms: 60_000,
            max_attempts: Some(20),
        }
    }
}

impl ReconnectPolicy {
    /// Delay before reconnect attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> u32 {
        let exponent = attempt.saturating_sub(1).min(16);
        self.base_delay_ms
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay_ms.max(self.base_delay_ms))
    }

    pub fn should_retry(&self, attempt: u32) -> bool {
        match self.max_attempts {
            Some(max) => attempt <= max,
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_doubles_and_caps() {
        let policy = ReconnectPolicy::default();
        assert_eq!(policy.delay_for(1), 5_000);
        assert_eq!(policy.delay_for(2), 10_000);
        assert_eq!(policy.delay_for(3), 20_000);
        assert_eq!(policy.delay_for(4), 40_000);
        assert_eq!(policy.delay_for(5), 60_000);
        assert_eq!(policy.delay_for(500), 60_000);
    }

    #[test]
    fn test_attempt_cap() {
        let capped = ReconnectPolicy {
            max_attempts: Some(3),
            ..ReconnectPolicy::default()
        };
        assert!(capped.should_retry(3));
        assert!(!capped.should_retry(4));

        let unbounded = ReconnectPolicy {
            max_attempts: None,
            ..ReconnectPolicy::default()
        };
        assert!(unbounded.should_retry(10_000));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let policy: ReconnectPolicy = serde_json::from_str(r#"{"base_delay_ms": 1000}"#).unwrap();
        assert_eq!(policy.base_delay_ms, 1_000);
        assert_eq!(policy.max_delay_ms, 60_000);
    }
}

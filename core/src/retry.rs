//! Retry policy for transient control-plane failures.

use std::time::Duration;

/// Decides whether an attempt's outcome warrants another attempt, and how
/// long to wait between them.
///
/// Transport-level failures (resets, timeouts) always retry. On an HTTP
/// response, 401 and every 5xx except 501 retry; 501 is a permanent
/// not-implemented signal. Attempts stop at `max_attempts`, and the last
/// outcome is handed back to the caller.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub wait_min: Duration,
    pub wait_max: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            wait_min: Duration::from_millis(500),
            wait_max: Duration::from_secs(15),
        }
    }
}

impl RetryPolicy {
    /// Whether the outcome of one attempt should be retried.
    pub fn should_retry(&self, status: Option<u16>, transport_error: bool) -> bool {
        if transport_error {
            return true;
        }
        match status {
            Some(401) => true,
            Some(status) => status >= 500 && status != 501,
            None => false,
        }
    }

    /// Backoff before attempt `attempt + 1`: doubles from `wait_min`,
    /// capped at `wait_max`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.wait_min
            .saturating_mul(1u32 << exponent)
            .min(self.wait_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> RetryPolicy {
        RetryPolicy::default()
    }

    #[test]
    fn retries_transport_errors() {
        assert!(policy().should_retry(None, true));
    }

    #[test]
    fn retries_unauthorized() {
        assert!(policy().should_retry(Some(401), false));
    }

    #[test]
    fn retries_server_errors_except_not_implemented() {
        assert!(policy().should_retry(Some(500), false));
        assert!(policy().should_retry(Some(502), false));
        assert!(policy().should_retry(Some(503), false));
        assert!(!policy().should_retry(Some(501), false));
    }

    #[test]
    fn does_not_retry_success_or_client_errors() {
        assert!(!policy().should_retry(Some(200), false));
        assert!(!policy().should_retry(Some(204), false));
        assert!(!policy().should_retry(Some(404), false));
        assert!(!policy().should_retry(Some(400), false));
    }

    #[test]
    fn backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_attempts: 10,
            wait_min: Duration::from_millis(100),
            wait_max: Duration::from_millis(450),
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(400));
        assert_eq!(policy.backoff(4), Duration::from_millis(450));
        assert_eq!(policy.backoff(30), Duration::from_millis(450));
    }
}

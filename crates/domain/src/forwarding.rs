//! Forwarding policy: when to push the current snapshot to the remote collector.

use std::time::{Duration, Instant};

use crate::time::elapsed_between;

/// Minimum time between two pushes to the remote collector.
pub const DEFAULT_FORWARD_INTERVAL: Duration = Duration::from_secs(30);

/// Rate limit for the remote collector push.
///
/// The caller advances its `last_forwarded_at` after every attempt,
/// successful or not, so a failing collector is retried at the same pace
/// as a healthy one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForwardingPolicy {
    min_interval: Duration,
}

impl Default for ForwardingPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FORWARD_INTERVAL)
    }
}

impl ForwardingPolicy {
    #[must_use]
    pub fn new(min_interval: Duration) -> Self {
        Self { min_interval }
    }

    #[must_use]
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Whether a snapshot should be forwarded at `now`.
    ///
    /// Never forwards before the first report has been ingested. Once data
    /// exists, forwards immediately if nothing was ever forwarded, otherwise
    /// once `min_interval` has elapsed since `last_forwarded_at`.
    #[must_use]
    pub fn should_forward(
        &self,
        now: Instant,
        last_forwarded_at: Option<Instant>,
        have_data: bool,
    ) -> bool {
        if !have_data {
            return false;
        }
        match last_forwarded_at {
            None => true,
            Some(last) => elapsed_between(last, now) >= self.min_interval,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_use_thirty_seconds_by_default() {
        assert_eq!(
            ForwardingPolicy::default().min_interval(),
            Duration::from_secs(30)
        );
    }

    #[test]
    fn should_not_forward_without_data() {
        let policy = ForwardingPolicy::default();
        let now = Instant::now();
        assert!(!policy.should_forward(now, None, false));
        let long_ago = now.checked_sub(Duration::from_secs(3600));
        assert!(!policy.should_forward(now, long_ago, false));
    }

    #[test]
    fn should_forward_first_snapshot_immediately() {
        let policy = ForwardingPolicy::default();
        assert!(policy.should_forward(Instant::now(), None, true));
    }

    #[test]
    fn should_not_forward_before_interval_elapsed() {
        let policy = ForwardingPolicy::default();
        let last = Instant::now();
        assert!(!policy.should_forward(last, Some(last), true));
        assert!(!policy.should_forward(last + Duration::from_millis(29_999), Some(last), true));
    }

    #[test]
    fn should_forward_once_interval_elapsed() {
        let policy = ForwardingPolicy::default();
        let last = Instant::now();
        assert!(policy.should_forward(last + Duration::from_secs(30), Some(last), true));
        assert!(policy.should_forward(last + Duration::from_secs(95), Some(last), true));
    }

    #[test]
    fn should_honor_custom_interval() {
        let policy = ForwardingPolicy::new(Duration::from_secs(5));
        let last = Instant::now();
        assert!(!policy.should_forward(last + Duration::from_secs(4), Some(last), true));
        assert!(policy.should_forward(last + Duration::from_secs(5), Some(last), true));
    }

    #[test]
    fn should_not_forward_when_clock_reads_before_last_forward() {
        let policy = ForwardingPolicy::default();
        let last = Instant::now() + Duration::from_secs(60);
        assert!(!policy.should_forward(Instant::now(), Some(last), true));
    }
}

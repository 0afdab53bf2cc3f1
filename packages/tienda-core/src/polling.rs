//! Cadence of the background refreshes.
//!
//! Each poll waits `next_delay()`. A failed fetch doubles the delay up to a
//! cap so an unreachable server is not hammered; the first success goes
//! back to the base interval.

use std::time::Duration;

/// Badge counters in the navigation shell.
pub const NOTIFICATIONS_INTERVAL: Duration = Duration::from_secs(60);
/// Pending discount authorization on the sales screen.
pub const AUTHORIZATION_INTERVAL: Duration = Duration::from_secs(3);
/// Shipments board.
pub const SHIPMENTS_INTERVAL: Duration = Duration::from_secs(30);

const DEFAULT_MAX_FACTOR: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    base: Duration,
    max: Duration,
    current: Duration,
    failures: u32,
}

impl PollSchedule {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            max: base * DEFAULT_MAX_FACTOR,
            current: base,
            failures: 0,
        }
    }

    pub fn with_max(mut self, max: Duration) -> Self {
        self.max = max.max(self.base);
        self
    }

    pub fn notifications() -> Self {
        Self::new(NOTIFICATIONS_INTERVAL)
    }

    pub fn authorization() -> Self {
        Self::new(AUTHORIZATION_INTERVAL).with_max(Duration::from_secs(15))
    }

    pub fn shipments() -> Self {
        Self::new(SHIPMENTS_INTERVAL)
    }

    pub fn next_delay(&self) -> Duration {
        self.current
    }

    pub fn failures(&self) -> u32 {
        self.failures
    }

    pub fn record_success(&mut self) {
        self.failures = 0;
        self.current = self.base;
    }

    pub fn record_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
        self.current = (self.current * 2).min(self.max);
        tracing::debug!(
            failures = self.failures,
            next_delay_ms = self.current.as_millis() as u64,
            "poll failed, backing off"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_doubles_until_cap() {
        let mut schedule = PollSchedule::new(Duration::from_secs(3)).with_max(Duration::from_secs(15));
        assert_eq!(schedule.next_delay(), Duration::from_secs(3));

        schedule.record_failure();
        assert_eq!(schedule.next_delay(), Duration::from_secs(6));
        schedule.record_failure();
        assert_eq!(schedule.next_delay(), Duration::from_secs(12));
        schedule.record_failure();
        assert_eq!(schedule.next_delay(), Duration::from_secs(15));
        schedule.record_failure();
        assert_eq!(schedule.next_delay(), Duration::from_secs(15));
        assert_eq!(schedule.failures(), 4);
    }

    #[test]
    fn test_success_resets() {
        let mut schedule = PollSchedule::shipments();
        schedule.record_failure();
        schedule.record_failure();
        schedule.record_success();
        assert_eq!(schedule.next_delay(), SHIPMENTS_INTERVAL);
        assert_eq!(schedule.failures(), 0);
    }

    #[test]
    fn test_max_never_below_base() {
        let schedule = PollSchedule::new(Duration::from_secs(10)).with_max(Duration::from_secs(1));
        let mut s = schedule;
        s.record_failure();
        assert_eq!(s.next_delay(), Duration::from_secs(10));
    }

    #[test]
    fn test_named_intervals() {
        assert_eq!(PollSchedule::notifications().next_delay(), Duration::from_secs(60));
        assert_eq!(PollSchedule::authorization().next_delay(), Duration::from_secs(3));
    }
}

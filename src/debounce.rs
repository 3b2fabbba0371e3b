//! Single-slot debounce for snapshot writes

use std::time::{Duration, Instant};

/// At most one pending write. Arming an already armed slot keeps the
/// original deadline so a burst of edits produces one write.
#[derive(Debug)]
pub struct SaveDebouncer {
    delay: Duration,
    armed_at: Option<Instant>,
}

impl SaveDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, armed_at: None }
    }

    /// Returns true if this call armed the slot
    pub fn arm(&mut self, now: Instant) -> bool {
        if self.armed_at.is_some() {
            return false;
        }
        self.armed_at = Some(now);
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed_at.is_some()
    }

    /// Time left until the pending write is due, if one is pending
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.armed_at
            .map(|armed| (armed + self.delay).saturating_duration_since(now))
    }

    /// Disarm and report true if a write is due at `now`
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.remaining(now) {
            Some(left) if left.is_zero() => {
                self.armed_at = None;
                true
            }
            _ => false,
        }
    }

    /// Disarm regardless of deadline, reporting whether a write was pending
    pub fn take(&mut self) -> bool {
        self.armed_at.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arm_is_idempotent() {
        let mut debouncer = SaveDebouncer::new(Duration::from_millis(100));
        let start = Instant::now();

        assert!(debouncer.arm(start));
        assert!(!debouncer.arm(start + Duration::from_millis(50)));
        // Deadline still measured from the first arm
        assert_eq!(
            debouncer.remaining(start + Duration::from_millis(60)),
            Some(Duration::from_millis(40))
        );
    }

    #[test]
    fn test_take_due_waits_for_delay() {
        let mut debouncer = SaveDebouncer::new(Duration::from_millis(100));
        let start = Instant::now();
        debouncer.arm(start);

        assert!(!debouncer.take_due(start + Duration::from_millis(99)));
        assert!(debouncer.is_armed());
        assert!(debouncer.take_due(start + Duration::from_millis(100)));
        assert!(!debouncer.is_armed());
        assert!(!debouncer.take_due(start + Duration::from_millis(200)));
    }

    #[test]
    fn test_zero_delay_is_due_on_next_tick() {
        let mut debouncer = SaveDebouncer::new(Duration::ZERO);
        let start = Instant::now();
        debouncer.arm(start);
        assert!(debouncer.take_due(start));
    }

    #[test]
    fn test_take_ignores_deadline() {
        let mut debouncer = SaveDebouncer::new(Duration::from_secs(60));
        assert!(!debouncer.take());
        debouncer.arm(Instant::now());
        assert!(debouncer.take());
        assert!(!debouncer.is_armed());
    }
}

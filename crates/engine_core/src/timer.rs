//! One-shot deferred timers for frame-driven state machines.

use std::time::Duration;

/// A cancellable one-shot countdown.
///
/// Re-arming replaces any pending countdown instead of stacking a second one, so a
/// stale deadline can never fire after the timer was re-armed.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OneShot {
    remaining: Option<Duration>,
}

impl OneShot {
    /// A timer with nothing scheduled.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Schedule the timer to fire after `delay`. Returns true if a pending
    /// countdown was replaced.
    pub fn arm(&mut self, delay: Duration) -> bool {
        self.remaining.replace(delay).is_some()
    }

    /// Drop any pending countdown. Returns true if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.remaining.take().is_some()
    }

    /// Whether a countdown is scheduled and has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Time left before the timer fires, if armed.
    pub fn remaining(&self) -> Option<Duration> {
        self.remaining
    }

    /// Advance the countdown by `dt`. Returns true exactly once, on the tick
    /// where the deadline is reached.
    pub fn tick(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) if left <= dt => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_deadline() {
        let mut t = OneShot::idle();
        t.arm(Duration::from_millis(100));
        assert!(!t.tick(Duration::from_millis(60)));
        assert!(t.tick(Duration::from_millis(40)));
        assert!(!t.is_pending());
        assert!(!t.tick(Duration::from_millis(500)));
    }

    #[test]
    fn rearm_replaces_pending_deadline() {
        let mut t = OneShot::idle();
        assert!(!t.arm(Duration::from_millis(100)));
        t.tick(Duration::from_millis(90));
        // Re-arming restarts the full delay rather than keeping the old 10ms.
        assert!(t.arm(Duration::from_millis(100)));
        assert!(!t.tick(Duration::from_millis(50)));
        assert_eq!(t.remaining(), Some(Duration::from_millis(50)));
        assert!(t.tick(Duration::from_millis(50)));
    }

    #[test]
    fn cancel_prevents_firing() {
        let mut t = OneShot::idle();
        t.arm(Duration::from_millis(10));
        assert!(t.cancel());
        assert!(!t.tick(Duration::from_secs(1)));
        assert!(!t.cancel());
    }

    #[test]
    fn zero_delay_fires_on_next_tick() {
        let mut t = OneShot::idle();
        t.arm(Duration::ZERO);
        assert!(t.is_pending());
        assert!(t.tick(Duration::ZERO));
    }
}

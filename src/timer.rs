use std::time::Duration;

use instant::Instant;

/// A repeating timer polled by the event loop.
///
/// Fires at most once per poll. A late poll reschedules from the moment it
/// happened instead of firing a burst of catch-up ticks.
#[derive(Debug, Clone)]
pub struct RepeatingTimer {
    interval: Duration,
    next_due: Instant,
    active: bool,
    fired: u64,
}

impl RepeatingTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
            active: true,
            fired: 0,
        }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.active || now < self.next_due {
            return false;
        }
        let scheduled = self.next_due + self.interval;
        self.next_due = if scheduled <= now {
            now + self.interval
        } else {
            scheduled
        };
        self.fired += 1;
        true
    }

    /// When the event loop should wake next, None once cancelled
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.then_some(self.next_due)
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn fired(&self) -> u64 {
        self.fired
    }
}

use std::time::{Duration, Instant};

/// Self-rescheduling tick driven by the UI loop.
///
/// The next deadline is always measured from the poll that fired, so a
/// stalled frame produces a single late tick instead of a burst.
#[derive(Debug, Clone)]
pub struct RepeatingTick {
    interval: Duration,
    next: Option<Instant>,
}

impl RepeatingTick {
    pub fn start(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: Some(now + interval),
        }
    }

    /// Returns `true` when a tick is due and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next {
            Some(deadline) if now >= deadline => {
                self.next = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn is_cancelled(&self) -> bool {
        self.next.is_none()
    }

    /// Time left until the next tick, `None` once cancelled.
    pub fn until_next(&self, now: Instant) -> Option<Duration> {
        self.next.map(|d| d.saturating_duration_since(now))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

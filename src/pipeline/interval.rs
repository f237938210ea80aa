use std::time::{Duration, Instant};

// A self-rescheduling callback slot for the cooperative main loop: when it
// fires it re-arms itself one period later; cancel() disarms it.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    // next firing one period from `now`
    pub fn arm(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn cancel(&mut self) {
        self.next = None;
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.next
    }

    // true if due; re-arms from `now` so a late tick doesn't cause a burst
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.next {
            Some(due) if due <= now => {
                self.arm(now);
                true
            }
            _ => false,
        }
    }
}

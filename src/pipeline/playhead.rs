// Keeps the on-screen playhead in step with what the audio has actually
// played. The scheduler queues each step with the audio time it starts at;
// the draw tick only moves the playhead onto steps whose time has come.

use ringbuf::HeapRb;
use ringbuf::traits::{Consumer, Observer, RingBuffer};

pub const QUEUE_CAPACITY: usize = 64;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledStep {
    pub step: usize,
    pub audio_time: f64,
}

// FIFO of scheduled steps, oldest first. Overwrites the oldest entry when full.
pub struct StepQueue {
    rb: HeapRb<ScheduledStep>,
}

impl StepQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            rb: HeapRb::new(capacity.max(1)),
        }
    }

    pub fn push(&mut self, step: ScheduledStep) {
        self.rb.push_overwrite(step);
    }

    pub fn len(&self) -> usize {
        self.rb.occupied_len()
    }

    pub fn is_empty(&self) -> bool {
        self.rb.is_empty()
    }

    pub fn clear(&mut self) {
        while self.rb.try_pop().is_some() {}
    }

    // Pop everything due at `now`; returns the newest step popped
    pub fn drain_due(&mut self, now: f64) -> Option<usize> {
        let mut latest = None;
        while self.rb.try_peek().is_some_and(|s| s.audio_time <= now) {
            latest = self.rb.try_pop().map(|s| s.step);
        }
        latest
    }
}

impl Default for StepQueue {
    fn default() -> Self {
        Self::new(QUEUE_CAPACITY)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Playhead {
    last_drawn: Option<usize>,
}

impl Playhead {
    pub fn highlighted(&self) -> Option<usize> {
        self.last_drawn
    }

    // One draw tick. Returns true when the highlight moved.
    pub fn sync(&mut self, playing: bool, queue: &mut StepQueue, now: f64) -> bool {
        let next = if playing {
            queue.drain_due(now).or(self.last_drawn)
        } else {
            None
        };
        let moved = next != self.last_drawn;
        if moved {
            log::trace!("playhead {:?} -> {:?}", self.last_drawn, next);
        }
        self.last_drawn = next;
        moved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(steps: &[(usize, f64)]) -> StepQueue {
        let mut q = StepQueue::default();
        for &(step, audio_time) in steps {
            q.push(ScheduledStep { step, audio_time });
        }
        q
    }

    #[test]
    fn drains_only_what_is_due() {
        let mut q = queue_of(&[(0, 1.0), (1, 1.125), (2, 1.25)]);
        assert_eq!(q.drain_due(0.5), None);
        assert_eq!(q.len(), 3);
        assert_eq!(q.drain_due(1.125), Some(1));
        assert_eq!(q.len(), 1);
        assert_eq!(q.drain_due(2.0), Some(2));
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_drops_the_oldest() {
        let mut q = StepQueue::new(2);
        q.push(ScheduledStep { step: 0, audio_time: 0.0 });
        q.push(ScheduledStep { step: 1, audio_time: 0.1 });
        q.push(ScheduledStep { step: 2, audio_time: 0.2 });
        assert_eq!(q.len(), 2);
        assert_eq!(q.drain_due(0.1), Some(1));
    }

    #[test]
    fn never_highlights_a_future_step() {
        let mut q = queue_of(&[(0, 1.0), (1, 1.125), (2, 1.25), (3, 1.375)]);
        let mut head = Playhead::default();

        assert!(!head.sync(true, &mut q, 0.99));
        assert_eq!(head.highlighted(), None);

        assert!(head.sync(true, &mut q, 1.2));
        assert_eq!(head.highlighted(), Some(1));

        // nothing new due: stays put
        assert!(!head.sync(true, &mut q, 1.24));
        assert_eq!(head.highlighted(), Some(1));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn stopping_clears_the_highlight() {
        let mut q = queue_of(&[(4, 0.0)]);
        let mut head = Playhead::default();
        head.sync(true, &mut q, 1.0);
        assert_eq!(head.highlighted(), Some(4));
        assert!(head.sync(false, &mut q, 1.0));
        assert_eq!(head.highlighted(), None);
    }
}

// Timer scheduling. Handlers never wait; they emit timers and a scheduler
// decides when each one fires.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::notifier::NotificationId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimerKind {
    Show,
    Hide,
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timer {
    pub notification: NotificationId,
    pub kind: TimerKind,
}

impl Timer {
    pub fn new(notification: NotificationId, kind: TimerKind) -> Self {
        Self { notification, kind }
    }
}

pub trait Scheduler {
    // Arrange for `timer` to fire once, `after` from the scheduler's now
    fn schedule(&mut self, after: Duration, timer: Timer);
}

// Virtual clock scheduler. Time only moves when the owner advances it, so
// tests never wait on the wall clock.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Reverse<(Duration, u64, Timer)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    // Pop the earliest timer due at or before `deadline`, moving the clock to
    // its due time. Ties fire in scheduling order.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<Timer> {
        let due = match self.queue.peek() {
            Some(Reverse((due, _, _))) if *due <= deadline => *due,
            _ => return None,
        };
        let Reverse((_, _, timer)) = self.queue.pop()?;
        self.now = self.now.max(due);
        Some(timer)
    }

    // Move the clock to `deadline` once no more timers are due
    pub fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&mut self, after: Duration, timer: Timer) {
        let due = self.now + after;
        self.queue.push(Reverse((due, self.seq, timer)));
        self.seq += 1;
    }
}

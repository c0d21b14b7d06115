//! Self-rearming timers for the three tick kinds.
//!
//! Tick handlers never touch a timer directly. They return a [`Schedule`]
//! and the event loop feeds it back into a [`Scheduler`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Task {
    Snake,
    Monsters,
    Food,
}

/// What a tick handler wants after it ran.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Schedule {
    After(Duration),
    Stop,
}

pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, task: Task);

    fn apply(&mut self, task: Task, next: Schedule) {
        if let Schedule::After(delay) = next {
            self.schedule(delay, task);
        }
    }
}

/// Deadline-ordered queue driven by a caller-supplied clock.
///
/// Each task has at most one pending deadline; scheduling a task that is
/// already pending replaces it, so no tick ever runs twice concurrently.
pub struct TimerQueue {
    now: Instant,
    heap: BinaryHeap<Reverse<(Instant, u64, Task)>>,
    pending: [Option<u64>; 3],
    seq: u64,
}

impl TimerQueue {
    pub fn new(now: Instant) -> Self {
        TimerQueue { now, heap: BinaryHeap::new(), pending: [None; 3], seq: 0 }
    }

    /// Moves the queue's clock forward. Deadlines are computed from it.
    pub fn advance_to(&mut self, now: Instant) {
        if now > self.now {
            self.now = now;
        }
    }

    pub fn now(&self) -> Instant {
        self.now
    }

    pub fn is_pending(&self, task: Task) -> bool {
        self.pending[slot(task)].is_some()
    }

    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.discard_stale();
        self.heap.peek().map(|Reverse((at, _, _))| *at)
    }

    /// Pops the earliest task whose deadline is not after the current clock.
    pub fn pop_due(&mut self) -> Option<Task> {
        self.discard_stale();
        let due = matches!(self.heap.peek(), Some(Reverse((at, _, _))) if *at <= self.now);
        if !due {
            return None;
        }

        let Reverse((_, _, task)) = self.heap.pop()?;
        self.pending[slot(task)] = None;
        Some(task)
    }

    // Drop entries superseded by a later `schedule` of the same task
    fn discard_stale(&mut self) {
        while let Some(Reverse((_, seq, task))) = self.heap.peek() {
            if self.pending[slot(*task)] == Some(*seq) {
                break;
            }
            self.heap.pop();
        }
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, delay: Duration, task: Task) {
        self.seq += 1;
        self.pending[slot(task)] = Some(self.seq);
        self.heap.push(Reverse((self.now + delay, self.seq, task)));
    }
}

fn slot(task: Task) -> usize {
    match task {
        Task::Snake => 0,
        Task::Monsters => 1,
        Task::Food => 2,
    }
}

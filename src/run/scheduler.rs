//! Delayed task scheduling
//!
//! The animator never sleeps itself: it asks a [`Scheduler`] to hand back a
//! tick after a delay. [`VirtualTimer`] is a deterministic in-memory clock
//! that only moves when told to, which keeps playback testable.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Handle to a scheduled task
///
/// Cancelling is idempotent and visible to every clone of the token.
#[derive(Clone, Debug)]
pub struct CancellationToken {
    id: u64,
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    fn new(id: u64) -> Self {
        Self {
            id,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Identifier of the scheduled task
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Prevent the task from firing
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether the task was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// Source of delayed tasks
pub trait Scheduler<T> {
    /// Current time of the scheduler's clock
    fn now(&self) -> Duration;

    /// Schedule `task` to become due after `delay`
    fn schedule(&mut self, task: T, delay: Duration) -> CancellationToken;

    /// Cancel a scheduled task
    fn cancel(&mut self, token: &CancellationToken) {
        token.cancel();
    }

    /// Pop the earliest task due at or before `deadline`
    ///
    /// The clock moves to the task's due time. When nothing is due the clock
    /// moves to `deadline` and `None` is returned.
    fn poll(&mut self, deadline: Duration) -> Option<T>;

    /// Number of tasks still waiting (cancelled ones excluded)
    fn pending(&self) -> usize;
}

struct Entry<T> {
    due: Duration,
    token: CancellationToken,
    task: T,
}

/// Deterministic clock driven by explicit time advances
pub struct VirtualTimer<T> {
    now: Duration,
    next_id: u64,
    queue: Vec<Entry<T>>,
}

impl<T> VirtualTimer<T> {
    /// Create a timer at time zero
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            queue: Vec::new(),
        }
    }

    /// Advance the clock by `elapsed` and return every task that fell due
    pub fn advance(&mut self, elapsed: Duration) -> Vec<T> {
        let deadline = self.now + elapsed;
        let mut fired = Vec::new();
        while let Some(task) = self.poll(deadline) {
            fired.push(task);
        }
        fired
    }
}

impl<T> Default for VirtualTimer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> for VirtualTimer<T> {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, task: T, delay: Duration) -> CancellationToken {
        let token = CancellationToken::new(self.next_id);
        self.next_id += 1;
        self.queue.push(Entry {
            due: self.now + delay,
            token: token.clone(),
            task,
        });
        token
    }

    fn cancel(&mut self, token: &CancellationToken) {
        token.cancel();
        self.queue.retain(|entry| entry.token.id() != token.id());
    }

    fn poll(&mut self, deadline: Duration) -> Option<T> {
        self.queue.retain(|entry| !entry.token.is_cancelled());

        // Earliest due first, scheduling order on ties
        let next = self
            .queue
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.due <= deadline)
            .min_by_key(|(_, entry)| (entry.due, entry.token.id()))
            .map(|(index, _)| index);

        match next {
            Some(index) => {
                let entry = self.queue.remove(index);
                self.now = self.now.max(entry.due);
                Some(entry.task)
            }
            None => {
                self.now = self.now.max(deadline);
                None
            }
        }
    }

    fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|entry| !entry.token.is_cancelled())
            .count()
    }
}

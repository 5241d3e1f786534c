//! Fixed-capacity FIFO with blocking push and pop

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::trace;

/// Capacity used when none is configured
pub const DEFAULT_QUEUE_CAPACITY: usize = 30;

#[derive(Debug)]
struct QueueState<T> {
    items: VecDeque<T>,

    /// Highest length ever observed
    peak: usize,
}

/// A bounded FIFO shared by any number of producing and consuming threads.
///
/// `push` blocks while the queue is full and `pop` blocks while it is empty,
/// which gives intake threads backpressure against slow solvers. Both
/// conditions are re-checked after every wake-up.
#[derive(Debug)]
pub struct DemandQueue<T> {
    state: Mutex<QueueState<T>>,
    capacity: usize,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> DemandQueue<T> {
    /// Create a queue holding at most `capacity` items. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                peak: 0,
            }),
            capacity,
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Append an item, blocking while the queue is full
    pub fn push(&self, item: T) {
        let mut state = self.state.lock();
        while state.items.len() >= self.capacity {
            self.not_full.wait(&mut state);
        }
        Self::append(&mut state, item);
        trace!("queue push, len {}/{}", state.items.len(), self.capacity);
        drop(state);
        self.not_empty.notify_one();
    }

    /// Append an item unless the queue is full, handing it back in that case
    pub fn try_push(&self, item: T) -> Result<(), T> {
        let mut state = self.state.lock();
        if state.items.len() >= self.capacity {
            return Err(item);
        }
        Self::append(&mut state, item);
        drop(state);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Remove the head, blocking while the queue is empty
    pub fn pop(&self) -> T {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                trace!("queue pop, len {}/{}", state.items.len(), self.capacity);
                drop(state);
                self.not_full.notify_one();
                return item;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Remove the head if there is one
    pub fn try_pop(&self) -> Option<T> {
        let item = self.state.lock().items.pop_front();
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Remove the head, waiting at most `timeout` for one to arrive
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T> {
        let deadline = Instant::now() + timeout;
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(item);
            }
            if self.not_empty.wait_until(&mut state, deadline).timed_out() {
                let item = state.items.pop_front();
                drop(state);
                if item.is_some() {
                    self.not_full.notify_one();
                }
                return item;
            }
        }
    }

    fn append(state: &mut QueueState<T>, item: T) {
        state.items.push_back(item);
        state.peak = state.peak.max(state.items.len());
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// True when a push would block
    pub fn is_full(&self) -> bool {
        self.state.lock().items.len() >= self.capacity
    }

    /// Maximum number of queued items
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Highest length the queue has reached so far
    pub fn peak_len(&self) -> usize {
        self.state.lock().peak
    }
}

impl<T> Default for DemandQueue<T> {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

//! The shared bounded queue and its synchronization discipline.
//!
//! Three primitives cooperate here:
//!
//! - a [`Semaphore`] holding one permit per free slot, taken by the producer
//!   before it touches the queue lock and given back by the consumer after it
//!   has dropped the lock;
//! - a `Mutex` around the FIFO itself, so every read or mutation of the items
//!   is serialized;
//! - a `Condvar` tied to that mutex on which the consumer sleeps until the
//!   queue has work or the stream has been closed.
//!
//! The end-of-stream flag is an `AtomicBool` so it can be read without any
//! lock, but it is only ever stored while the queue mutex is held. A consumer
//! that has just evaluated its wait predicate still holds the mutex, so the
//! store cannot slip in between that check and the consumer going to sleep.
//!
//! If the consumer goes away without draining the queue, it abandons the slot
//! semaphore so a producer blocked on a full queue gives up instead of waiting
//! for a slot that will never come back.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard};

use crate::diag;
use crate::error::{BufferError, Result};
use crate::semaphore::Semaphore;

struct QueueState<T> {
    items: VecDeque<T>,
    peak_len: usize,
}

pub struct BoundedQueue<T> {
    state: Mutex<QueueState<T>>,
    ready: Condvar,
    slots: Semaphore,
    closed: AtomicBool,
    capacity: usize,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidCapacity { capacity });
        }
        Ok(BoundedQueue {
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                peak_len: 0,
            }),
            ready: Condvar::new(),
            slots: Semaphore::new(capacity),
            closed: AtomicBool::new(false),
            capacity,
        })
    }

    //==========================================================================
    // Producer side
    //==========================================================================

    /// Waits for a free slot, then builds the item and appends it.
    ///
    /// `make` and `on_push` both run while the queue lock is held, so whatever
    /// `on_push` reports is the item that was just appended. If `make`
    /// returns `None` the slot is handed back and nothing is pushed. Also
    /// returns `false` once the queue has been abandoned.
    pub fn push_with<M, R>(&self, make: M, on_push: R) -> bool
    where
        M: FnOnce() -> Option<T>,
        R: FnOnce(&T),
    {
        // Never block on capacity while holding the queue lock.
        if !self.slots.acquire() {
            return false;
        }

        let mut state = self.lock();
        let Some(item) = make() else {
            drop(state);
            self.slots.release();
            return false;
        };

        debug_assert!(state.items.len() < self.capacity, "queue over capacity");
        state.items.push_back(item);
        state.peak_len = state.peak_len.max(state.items.len());
        if let Some(pushed) = state.items.back() {
            on_push(pushed);
        }
        drop(state);

        self.ready.notify_all();
        true
    }

    pub fn push(&self, item: T) -> bool {
        self.push_with(|| Some(item), |_| {})
    }

    /// Marks the end of the stream and wakes every waiter.
    ///
    /// Items still queued stay available; consumers only stop once the
    /// queue is both closed and empty.
    pub fn close(&self) {
        let state = self.lock();
        self.closed.store(true, Ordering::Release);
        drop(state);
        self.ready.notify_all();
    }

    //==========================================================================
    // Consumer side
    //==========================================================================

    /// Blocks until an item is available or the stream is closed and drained.
    ///
    /// Returns `None` only in the second case. `on_pop` runs after the queue
    /// lock is released and before the slot is handed back to the producer.
    pub fn pop_with<F>(&self, on_pop: F) -> Option<T>
    where
        F: FnOnce(&T),
    {
        let mut state = self.lock();
        // Re-check after every wake, spurious or not, and after poison recovery.
        while state.items.is_empty() && !self.closed.load(Ordering::Acquire) {
            state = self.ready.wait(state).unwrap_or_else(|poisoned| {
                diag::warn("queue mutex was poisoned, recovering");
                poisoned.into_inner()
            });
        }
        let item = state.items.pop_front();
        drop(state);

        let item = item?;
        on_pop(&item);
        self.slots.release();
        Some(item)
    }

    pub fn pop(&self) -> Option<T> {
        self.pop_with(|_| {})
    }

    /// Gives up on the stream from the consumer side.
    ///
    /// Producers blocked waiting for a slot wake up, and every later push
    /// fails.
    pub fn abandon(&self) {
        self.slots.abandon();
    }

    /// Wakes every thread sleeping on the queue without changing its state.
    pub fn wake_all(&self) {
        self.ready.notify_all();
    }

    //==========================================================================
    // Observers
    //==========================================================================

    pub fn len(&self) -> usize {
        self.lock().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().items.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    pub fn is_abandoned(&self) -> bool {
        self.slots.is_abandoned()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available_slots(&self) -> usize {
        self.slots.available()
    }

    /// Highest length the queue has reached so far.
    pub fn peak_len(&self) -> usize {
        self.lock().peak_len
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(|poisoned| {
            diag::warn("queue mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

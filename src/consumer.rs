use std::thread;

use crate::queue::BoundedQueue;
use crate::sink::Sink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerState {
    Waiting,
    Consuming,
    Terminated,
}

pub struct Consumer<'a, S> {
    queue: &'a BoundedQueue<i32>,
    sink: &'a S,
    state: ConsumerState,
    consumed: usize,
}

/// Abandons the queue if the consumer unwinds, so a producer waiting on a
/// full queue is released.
struct AbandonOnUnwind<'a>(&'a BoundedQueue<i32>);

impl Drop for AbandonOnUnwind<'_> {
    fn drop(&mut self) {
        if thread::panicking() {
            self.0.abandon();
        }
    }
}

impl<'a, S: Sink> Consumer<'a, S> {
    pub fn new(queue: &'a BoundedQueue<i32>, sink: &'a S) -> Self {
        Consumer {
            queue,
            sink,
            state: ConsumerState::Waiting,
            consumed: 0,
        }
    }

    /// Drains the queue until it is closed and empty. Returns the number of
    /// values consumed over the consumer's lifetime.
    pub fn run(&mut self) -> usize {
        let _abandon = AbandonOnUnwind(self.queue);
        while self.step() {}
        self.consumed
    }

    /// Waits for and consumes a single value.
    ///
    /// Returns `false` once the stream is closed and drained; every later
    /// call returns `false` without touching the queue.
    pub fn step(&mut self) -> bool {
        if self.state == ConsumerState::Terminated {
            return false;
        }

        self.state = ConsumerState::Waiting;
        let sink = self.sink;
        match self.queue.pop_with(|value| sink.consumed(*value)) {
            Some(_) => {
                self.state = ConsumerState::Consuming;
                self.consumed += 1;
                true
            }
            None => {
                self.state = ConsumerState::Terminated;
                false
            }
        }
    }

    pub fn state(&self) -> ConsumerState {
        self.state
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

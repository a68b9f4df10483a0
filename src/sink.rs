use std::sync::{Mutex, PoisonError};

/// Receives one report per value moved through the queue.
pub trait Sink: Sync {
    fn produced(&self, value: i32);
    fn consumed(&self, value: i32);
}

/// Writes the two standard-output line formats.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl Sink for ConsoleSink {
    fn produced(&self, value: i32) {
        println!("{}", produced_line(value));
    }

    fn consumed(&self, value: i32) {
        println!("{}", consumed_line(value));
    }
}

pub fn produced_line(value: i32) -> String {
    format!("Produced: {}", value)
}

pub fn consumed_line(value: i32) -> String {
    format!("Consumed: {}", value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Produced(i32),
    Consumed(i32),
}

impl Event {
    pub fn line(&self) -> String {
        match self {
            Event::Produced(value) => produced_line(*value),
            Event::Consumed(value) => consumed_line(*value),
        }
    }
}

/// Keeps every report in arrival order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn produced_values(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Produced(value) => Some(value),
                Event::Consumed(_) => None,
            })
            .collect()
    }

    pub fn consumed_values(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Consumed(value) => Some(value),
                Event::Produced(_) => None,
            })
            .collect()
    }

    fn record(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}

impl Sink for RecordingSink {
    fn produced(&self, value: i32) {
        self.record(Event::Produced(value));
    }

    fn consumed(&self, value: i32) {
        self.record(Event::Consumed(value));
    }
}

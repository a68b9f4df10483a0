//! Run configuration.
//!
//! The shipped binary only ever uses [`Config::default`]; the builder methods
//! exist so tests can shrink the queue or script a shorter run.

use crate::error::{BufferError, Result};

pub const QUEUE_CAPACITY: usize = 10;
pub const ITEM_COUNT: usize = 100;
pub const VALUE_MIN: i32 = 1;
pub const VALUE_MAX: i32 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub capacity: usize,
    pub items: usize,
    pub min_value: i32,
    pub max_value: i32,
    /// Suppresses stderr diagnostics. Standard output is never affected.
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            capacity: QUEUE_CAPACITY,
            items: ITEM_COUNT,
            min_value: VALUE_MIN,
            max_value: VALUE_MAX,
            quiet: false,
        }
    }
}

impl Config {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_items(mut self, items: usize) -> Self {
        self.items = items;
        self
    }

    pub fn with_range(mut self, min_value: i32, max_value: i32) -> Self {
        self.min_value = min_value;
        self.max_value = max_value;
        self
    }

    pub fn quiet(mut self) -> Self {
        self.quiet = true;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(BufferError::InvalidCapacity {
                capacity: self.capacity,
            });
        }
        if self.items == 0 {
            return Err(BufferError::InvalidItemCount);
        }
        if self.min_value > self.max_value {
            return Err(BufferError::InvalidRange {
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }
}

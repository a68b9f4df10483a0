//==============================================================================
// Bounded-buffer producer/consumer
//==============================================================================
//
// One producer pushes random integers into a capacity-limited queue, one
// consumer drains it until the producer closes the stream. See `queue` for
// the locking discipline.

pub mod config;
pub mod consumer;
pub mod diag;
pub mod error;
pub mod producer;
pub mod queue;
pub mod runner;
pub mod semaphore;
pub mod sink;

pub use config::Config;
pub use consumer::{Consumer, ConsumerState};
pub use error::{BufferError, Result};
pub use producer::{Producer, UniformValues};
pub use queue::BoundedQueue;
pub use runner::{run, RunReport};
pub use semaphore::Semaphore;
pub use sink::{ConsoleSink, Event, RecordingSink, Sink};

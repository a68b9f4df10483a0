use std::thread;

use crate::config::Config;
use crate::consumer::Consumer;
use crate::diag;
use crate::error::{BufferError, Result};
use crate::producer::Producer;
use crate::queue::BoundedQueue;
use crate::sink::Sink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunReport {
    pub produced: usize,
    pub consumed: usize,
    /// Highest queue length observed during the run.
    pub peak_len: usize,
}

/// Runs one producer and one consumer over a fresh queue and joins both.
pub fn run<I, S>(config: &Config, values: I, sink: &S) -> Result<RunReport>
where
    I: Iterator<Item = i32> + Send,
    S: Sink,
{
    config.validate()?;
    let queue = BoundedQueue::new(config.capacity)?;

    if !config.quiet {
        diag::info(format!(
            "starting producer/consumer: capacity={}, items={}, range=[{}, {}]",
            queue.capacity(),
            config.items,
            config.min_value,
            config.max_value
        ));
    }

    let queue = &queue;
    let items = config.items;
    let (produced, consumed) = thread::scope(|s| {
        let producer = s.spawn(move || Producer::new(queue, sink, items).run(values));
        let consumer = s.spawn(move || Consumer::new(queue, sink).run());

        let produced = producer
            .join()
            .map_err(|_| BufferError::WorkerPanicked { role: "producer" });
        let consumed = consumer
            .join()
            .map_err(|_| BufferError::WorkerPanicked { role: "consumer" });
        (produced, consumed)
    });
    // A consumer panic makes the producer stop early, so report it first.
    let consumed = consumed?;
    let produced = produced??;

    let report = RunReport {
        produced,
        consumed,
        peak_len: queue.peak_len(),
    };

    if !config.quiet {
        diag::info(format!(
            "finished: produced={}, consumed={}, peak queue length={}",
            report.produced, report.consumed, report.peak_len
        ));
    }
    Ok(report)
}

use rand::distributions::Uniform;
use rand::Rng;

use crate::error::{BufferError, Result};
use crate::queue::BoundedQueue;
use crate::sink::Sink;

//==============================================================================
// Value source
//==============================================================================

/// Endless stream of integers drawn uniformly from an inclusive range.
pub struct UniformValues<R> {
    rng: R,
    range: Uniform<i32>,
}

impl<R: Rng> UniformValues<R> {
    pub fn new(rng: R, min: i32, max: i32) -> Result<Self> {
        if min > max {
            return Err(BufferError::InvalidRange { min, max });
        }
        Ok(UniformValues {
            rng,
            range: Uniform::new_inclusive(min, max),
        })
    }
}

impl<R: Rng> Iterator for UniformValues<R> {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        Some(self.rng.sample(self.range))
    }
}

//==============================================================================
// Producer
//==============================================================================

pub struct Producer<'a, S> {
    queue: &'a BoundedQueue<i32>,
    sink: &'a S,
    items: usize,
}

/// Closes the queue when dropped, so the consumer is released even if the
/// producer unwinds.
struct CloseOnDrop<'a>(&'a BoundedQueue<i32>);

impl Drop for CloseOnDrop<'_> {
    fn drop(&mut self) {
        self.0.close();
    }
}

impl<'a, S: Sink> Producer<'a, S> {
    pub fn new(queue: &'a BoundedQueue<i32>, sink: &'a S, items: usize) -> Self {
        Producer { queue, sink, items }
    }

    /// Pushes `items` values drawn from `values`, then closes the stream.
    ///
    /// Each value is pulled from the source and reported while the queue lock
    /// is held. Returns the number of values pushed.
    pub fn run<I>(self, mut values: I) -> Result<usize>
    where
        I: Iterator<Item = i32>,
    {
        let _close = CloseOnDrop(self.queue);
        let sink = self.sink;

        let mut produced = 0;
        for _ in 0..self.items {
            if !self
                .queue
                .push_with(|| values.next(), |value| sink.produced(*value))
            {
                let expected = self.items;
                return Err(if self.queue.is_abandoned() {
                    BufferError::ConsumerGone { produced, expected }
                } else {
                    BufferError::SourceExhausted { produced, expected }
                });
            }
            produced += 1;
        }
        Ok(produced)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::RecordingSink;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_uniform_values_stay_in_range() {
        let values = UniformValues::new(StdRng::seed_from_u64(7), 1, 50).unwrap();
        for value in values.take(1_000) {
            assert!((1..=50).contains(&value), "{} out of range", value);
        }
    }

    #[test]
    fn test_uniform_values_single_point_range() {
        let values = UniformValues::new(StdRng::seed_from_u64(1), 9, 9).unwrap();
        assert!(values.take(20).all(|value| value == 9));
    }

    #[test]
    fn test_uniform_values_rejects_empty_range() {
        assert_eq!(
            UniformValues::new(StdRng::seed_from_u64(0), 5, 4).err(),
            Some(BufferError::InvalidRange { min: 5, max: 4 })
        );
    }

    #[test]
    fn test_producer_fills_and_closes() {
        let queue = BoundedQueue::new(3).unwrap();
        let sink = RecordingSink::new();

        let produced = Producer::new(&queue, &sink, 3)
            .run(vec![4, 5, 6].into_iter())
            .unwrap();

        assert_eq!(produced, 3);
        assert!(queue.is_closed());
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.available_slots(), 0);
        assert_eq!(sink.produced_values(), vec![4, 5, 6]);
    }

    #[test]
    fn test_producer_stops_when_queue_is_abandoned() {
        let queue = BoundedQueue::new(2).unwrap();
        let sink = RecordingSink::new();
        queue.abandon();

        let result = Producer::new(&queue, &sink, 3).run(vec![1, 2, 3].into_iter());

        assert_eq!(
            result,
            Err(BufferError::ConsumerGone {
                produced: 0,
                expected: 3
            })
        );
        assert!(queue.is_closed());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_producer_reports_exhausted_source_and_still_closes() {
        let queue = BoundedQueue::new(5).unwrap();
        let sink = RecordingSink::new();

        let result = Producer::new(&queue, &sink, 4).run(vec![1, 2].into_iter());

        assert_eq!(
            result,
            Err(BufferError::SourceExhausted {
                produced: 2,
                expected: 4
            })
        );
        assert!(queue.is_closed());
        assert_eq!(queue.len(), 2);
        // The slot taken for the missing third value was handed back.
        assert_eq!(queue.available_slots(), 3);
    }
}

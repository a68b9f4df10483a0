use thiserror::Error;

//==============================================================================
// Error types
//==============================================================================

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Cannot initialize capacity limiter with {capacity} slots (need at least 1)")]
    InvalidCapacity { capacity: usize },

    #[error("Item count must be at least 1")]
    InvalidItemCount,

    #[error("Value range [{min}, {max}] is empty")]
    InvalidRange { min: i32, max: i32 },

    #[error("Value source ran dry after {produced} of {expected} values")]
    SourceExhausted { produced: usize, expected: usize },

    #[error("Consumer stopped after {produced} of {expected} values were produced")]
    ConsumerGone { produced: usize, expected: usize },

    #[error("The {role} thread panicked")]
    WorkerPanicked { role: &'static str },
}

pub type Result<T> = std::result::Result<T, BufferError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = BufferError::InvalidCapacity { capacity: 0 };
        assert_eq!(
            err.to_string(),
            "Cannot initialize capacity limiter with 0 slots (need at least 1)"
        );

        let err = BufferError::SourceExhausted {
            produced: 3,
            expected: 5,
        };
        assert_eq!(err.to_string(), "Value source ran dry after 3 of 5 values");

        let err = BufferError::WorkerPanicked { role: "consumer" };
        assert_eq!(err.to_string(), "The consumer thread panicked");
    }
}

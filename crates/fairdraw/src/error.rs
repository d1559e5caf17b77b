//! Error types for fairdraw.
//!
//! All errors are strongly typed and propagated without panicking.
//! Nothing in the library terminates the process; callers decide how
//! failures are rendered.

/// Draw error types covering selection, ledger and storage operations.
#[derive(Debug, thiserror::Error)]
pub enum DrawError {
    #[error("No participants in the draw")]
    EmptyInput,

    #[error("Total frequency is 0; cannot derive selection probabilities")]
    ZeroTotalFrequency,

    #[error("Selection probabilities could not be computed; check the frequencies")]
    DegenerateWeights,

    #[error("Frequency for '{key}' is negative ({value})")]
    NegativeFrequency { key: String, value: f64 },

    #[error("Frequency for '{key}' is not a finite number ({value})")]
    InvalidFrequency { key: String, value: f64 },

    #[error("Invalid weights document: {0}")]
    InvalidWeights(String),

    #[error("Participant not found: {0}")]
    NotFound(String),

    #[error("Duplicate participant id: {0}")]
    DuplicateId(i64),

    #[error("Invalid participant: {0}")]
    InvalidParticipant(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DrawError {
    /// True for failures caused by the weights handed to a draw.
    ///
    /// A draw that fails with an input error has not sampled anything and
    /// has not touched any record.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyInput
                | Self::ZeroTotalFrequency
                | Self::DegenerateWeights
                | Self::NegativeFrequency { .. }
                | Self::InvalidFrequency { .. }
                | Self::InvalidWeights(_)
        )
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, DrawError>;

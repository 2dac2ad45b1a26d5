//! Error types for emg-hdc.

use thiserror::Error;

/// Result type alias for emg-hdc operations.
pub type Result<T> = std::result::Result<T, HdcError>;

/// Errors that can occur while building, training or querying an HDC model.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HdcError {
    /// Invalid argument or hyperparameter.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Dimension mismatch between operands.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// A table could not be allocated.
    #[error("allocation failure: could not reserve {requested} components for {what}")]
    AllocationFailure {
        /// The table being built.
        what: &'static str,
        /// Number of elements requested.
        requested: usize,
    },

    /// Quantized amplitude falls outside the continuous item memory.
    #[error("quantized key {key} out of range for item memory of {len} levels")]
    KeyOutOfRange {
        /// The quantized key.
        key: i64,
        /// Number of levels in the table.
        len: usize,
    },

    /// Cosine similarity requested against a zero vector.
    #[error("degenerate vector: cosine similarity is undefined for a zero-norm operand")]
    DegenerateVector,

    /// Prediction found no window it could evaluate.
    #[error("no eligible windows: accuracy is undefined for an empty evaluation")]
    NoEligibleWindows,
}

impl HdcError {
    /// Whether a per-window encoding error may be skipped while the batch continues.
    ///
    /// Only an out-of-range amplitude qualifies. A degenerate vector always
    /// reaches the caller.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::KeyOutOfRange { .. })
    }
}

/// Check two lengths for equality.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(HdcError::DimensionMismatch { expected, actual })
    }
}

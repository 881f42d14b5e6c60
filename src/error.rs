// src/error.rs

//! Error types for the prox-ggm crate.

use thiserror::Error;

/// Errors that can occur while estimating or scoring a precision matrix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GgmError {
    /// A matrix does not have the shape implied by the data.
    #[error("Dimension mismatch for {what}: expected {expected:?}, found {found:?}")]
    DimensionMismatch {
        /// Which argument had the wrong shape.
        what: &'static str,
        /// Shape implied by the sample matrix.
        expected: (usize, usize),
        /// Shape actually supplied.
        found: (usize, usize),
    },

    /// Input dimensions are invalid on their own.
    #[error("Invalid dimensions: {message}")]
    InvalidDimensions {
        /// Description of the dimension error.
        message: String,
    },

    /// An input matrix contains NaN or infinite entries.
    #[error("Non-finite entries in {what}")]
    NonFiniteInput {
        /// Which argument held the non-finite values.
        what: &'static str,
    },

    /// A singular matrix was encountered during computation.
    #[error("Singular matrix encountered during computation")]
    SingularMatrix,

    /// General computation error.
    #[error("Computation error: {message}")]
    ComputationError {
        /// Description of what went wrong.
        message: String,
    },

    /// Invalid configuration parameter.
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why it's invalid.
        message: String,
    },
}

/// Convenience type alias for Results with GgmError.
pub type Result<T> = std::result::Result<T, GgmError>;

//! Error types for polynomial regression
//!
//! This module defines the failure modes of building, solving and
//! evaluating a least-squares fit, along with a convenient `Result` alias.

/// Errors that can occur while fitting a polynomial.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot perform curve fitting because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// The requested polynomial degree needs more samples than were provided.
    ///
    /// A degree `d` fit has `d + 1` unknowns, so at least `d + 1` samples are required.
    #[error("Polynomial degree `{degree}` is too high for {samples} samples")]
    DegreeTooHigh {
        /// Requested degree
        degree: usize,
        /// Number of samples provided
        samples: usize,
    },

    /// No usable pivot was found during elimination.
    ///
    /// The samples are degenerate (for example duplicated x-values) for the requested degree,
    /// or the system is too ill-conditioned to solve at this precision.
    #[error(
        "Linear system is singular or ill-conditioned; no usable pivot in column {column}. [dim: {dim}]"
    )]
    SingularSystem {
        /// Elimination column whose pivot was (numerically) zero
        column: usize,
        /// Number of unknowns in the system
        dim: usize,
    },

    /// An augmented matrix did not have the `n x (n + 1)` shape the solver expects.
    #[error("Expected a {n}x{} augmented matrix, got {rows}x{cols}", .n + 1)]
    DimensionMismatch {
        /// Rows in the provided matrix
        rows: usize,
        /// Columns in the provided matrix
        cols: usize,
        /// Requested number of unknowns
        n: usize,
    },

    /// A numeric value could not be cast to the target type.
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// A line of tabular input could not be parsed.
    #[error("Invalid table data on line {line}: {message}")]
    Csv {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String,
    },

    /// Reading input failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A job description could not be parsed.
    #[error("Invalid job description: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for polynomial regression
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the core crate.

use thiserror::Error;

/// Errors that can occur in core operations.
///
/// The parameter model itself is total over its clamped domain; these variants
/// cover input validation at the API boundary and generator failures.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum CoreError {
    /// Factoring input was not an integer greater than one.
    #[error("Please enter an integer greater than 1.")]
    InvalidFactorInput,

    /// A floating-point parameter was NaN or infinite.
    #[error("Non-finite value for {field}")]
    NonFinite {
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// A sensing target was placed outside the grid.
    #[error("Target ({x}, {y}) outside {size}x{size} grid")]
    OutOfGrid { x: usize, y: usize, size: usize },

    /// A run generator failed to produce results.
    #[error("Generator error: {0}")]
    Generator(String),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

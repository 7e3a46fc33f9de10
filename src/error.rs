//! # Error Types
//!
//! This module defines the error types for the optimizer. It provides
//! specific variants for the failure scenarios that can occur while
//! configuring or running the engine.
//!
//! Cancellation and time-limit stops are *not* errors: they are reported
//! through [`RunOutcome`](crate::engine::RunOutcome), and callers should
//! discriminate full completion from early stops via the terminal state
//! rather than via `Err`.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use bitevolve::error::{EngineError, Result};
//!
//! fn some_function() -> Result<()> {
//!     // Function implementation
//!     Ok(())
//! }
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use bitevolve::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn read_seed_file(path: &str) -> Result<()> {
//!     File::open(path).context("Failed to open seed pattern file")?;
//!     Ok(())
//! }
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Error that occurs when an invalid configuration is provided:
    /// non-positive population or gene size, or a malformed seed pattern.
    /// Raised before any generation runs; no partial state is created.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when the externally supplied fitness function
    /// fails during a generation. The run aborts at that generation with
    /// the cause attached; the cleanup hook still executes.
    #[error("Fitness evaluation failed at generation {generation}")]
    Evaluation {
        /// Zero-based index of the generation whose evaluation failed.
        generation: usize,
        /// The underlying failure reported by the fitness function.
        #[source]
        source: Box<EngineError>,
    },

    /// Error that a fitness function can use to describe its own failure.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// Error that occurs when the post-run cleanup hook fails. Reported,
    /// but never allowed to mask the primary run outcome.
    #[error("Cleanup error: {0}")]
    Cleanup(String),

    /// Error that occurs when the command surface is asked for an engine
    /// name that was never registered.
    #[error("Unknown engine: {0}")]
    UnknownEngine(String),

    /// Error that occurs when command option strings cannot be parsed.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Error that occurs when an I/O operation fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for engine operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the
/// error type fixed to `EngineError`.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Extension trait for Result to add context to errors.
///
/// This trait provides a convenient way to add context to errors when
/// converting from another error type to `EngineError`.
///
/// ## Examples
///
/// ```rust
/// use bitevolve::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> bitevolve::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Adds context to an error, converting it to an `EngineError`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| EngineError::Other(format!("{}: {}", context, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluation_error_carries_cause() {
        let err = EngineError::Evaluation {
            generation: 3,
            source: Box::new(EngineError::FitnessCalculation(
                "missing column".to_string(),
            )),
        };
        assert!(err.to_string().contains("generation 3"));
        let source = StdError::source(&err).expect("cause must be attached");
        assert!(source.to_string().contains("missing column"));
    }

    #[test]
    fn test_context_wraps_foreign_errors() {
        let io_err: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "no such file",
        ));
        let err = io_err.context("loading seed patterns").unwrap_err();
        match err {
            EngineError::Other(msg) => {
                assert!(msg.contains("loading seed patterns"));
                assert!(msg.contains("no such file"));
            }
            _ => panic!("Expected Other error"),
        }
    }
}

//! Error handling for layout-bench
//!
//! Allocation failure is the only failure a measurement run expects. The
//! remaining variants cover configuration mistakes and report sink errors.

use thiserror::Error;

/// Main error type for layout-bench
#[derive(Error, Debug)]
pub enum BenchError {
    /// Memory allocation failures
    #[error("Memory allocation failed: requested {size} bytes")]
    OutOfMemory {
        /// Number of bytes requested
        size: usize,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },

    /// I/O errors while writing the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl BenchError {
    /// Create an out of memory error
    pub fn out_of_memory(size: usize) -> Self {
        Self::OutOfMemory { size }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::OutOfMemory { .. } => "memory",
            Self::Configuration { .. } => "config",
            Self::Io(_) => "io",
            Self::Csv(_) => "csv",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, BenchError>;

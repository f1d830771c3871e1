//! Run configuration
//!
//! The sizes and trial count of a measurement run are compiled-in constants.
//! [`BenchConfig::default`] reproduces them; tests and smoke runs use
//! [`BenchConfig::quick`] or the `with_*` setters to shrink a run.
//!
//! ```rust
//! use layout_bench::config::{BenchConfig, OutputFormat};
//!
//! let config = BenchConfig::quick()
//!     .with_sizes(vec![1, 10, 100])
//!     .with_format(OutputFormat::Csv);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{BenchError, Result};
use crate::memory::DEFAULT_SCRATCH_WORDS;
use std::fmt;

/// Collection sizes measured by a full run
pub const DEFAULT_SIZES: [usize; 9] = [
    1,
    10,
    100,
    1_000,
    10_000,
    100_000,
    1_000_000,
    10_000_000,
    100_000_000,
];

/// Timed trials per (size, strategy, operation)
pub const DEFAULT_TRIALS: usize = 100;

/// Report rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Fixed-width human-readable table
    #[default]
    Table,
    /// Comma-separated values with a header row
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Table => f.write_str("table"),
            OutputFormat::Csv => f.write_str("csv"),
        }
    }
}

/// Configuration of one measurement run
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Collection sizes, measured in order
    pub sizes: Vec<usize>,
    /// Timed trials per measurement
    pub trials: usize,
    /// Report rendering
    pub format: OutputFormat,
    /// Cache scratch buffer size in 64-bit words
    pub scratch_words: usize,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            trials: DEFAULT_TRIALS,
            format: OutputFormat::Table,
            scratch_words: DEFAULT_SCRATCH_WORDS,
        }
    }
}

impl BenchConfig {
    /// Small run for smoke tests: three sizes, ten trials, 64 KiB scratch
    pub fn quick() -> Self {
        Self {
            sizes: vec![1, 10, 100],
            trials: 10,
            format: OutputFormat::Table,
            scratch_words: 8 * 1024,
        }
    }

    /// Replace the size list
    pub fn with_sizes(mut self, sizes: Vec<usize>) -> Self {
        self.sizes = sizes;
        self
    }

    /// Replace the trial count
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Replace the output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Replace the scratch buffer size
    pub fn with_scratch_words(mut self, words: usize) -> Self {
        self.scratch_words = words;
        self
    }

    /// Check the configuration for values a run cannot use
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(BenchError::configuration("at least one size is required"));
        }
        if self.trials == 0 {
            return Err(BenchError::configuration("trials must be positive"));
        }
        if self.scratch_words == 0 {
            return Err(BenchError::configuration("scratch buffer must not be empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = BenchConfig::default();
        assert_eq!(config.sizes.len(), 9);
        assert_eq!(config.sizes[0], 1);
        assert_eq!(config.sizes[8], 100_000_000);
        assert!(config.sizes.windows(2).all(|w| w[1] == w[0] * 10));
        assert_eq!(config.trials, 100);
        assert_eq!(config.format, OutputFormat::Table);
        assert_eq!(config.scratch_words * 8, 17 * 1024 * 1024 * 8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_quick_preset() {
        let config = BenchConfig::quick();
        assert_eq!(config.sizes, vec![1, 10, 100]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_errors() {
        let base = BenchConfig::quick();

        let err = base.clone().with_trials(0).validate().unwrap_err();
        assert!(err.to_string().contains("trials"));

        let err = base.clone().with_sizes(Vec::new()).validate().unwrap_err();
        assert!(err.to_string().contains("size"));

        let err = base.with_scratch_words(0).validate().unwrap_err();
        assert_eq!(err.category(), "config");
    }

    #[test]
    fn test_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
        assert_eq!(OutputFormat::default(), OutputFormat::Table);
    }
}

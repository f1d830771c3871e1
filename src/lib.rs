//! # layout-bench: contiguous vs. indirect record storage
//!
//! This crate measures what it costs to keep a collection of non-relocatable
//! records in one contiguous, pre-sized allocation ([`StaticVec`]) compared
//! with the conventional one-allocation-per-record layout ([`BoxedVec`]).
//!
//! ## Key Pieces
//!
//! - **`StaticVec<T>`**: fixed-capacity vector with in-place construction and
//!   drop of only the live prefix
//! - **Timing harness**: repeated trials on a monotonic clock, mean and 95%
//!   confidence half-width per measurement
//! - **Cache normalization**: a random-filled scratch buffer larger than the
//!   last-level cache is rewritten between trials
//! - **Reports**: fixed-width table or CSV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use layout_bench::{run_benchmark, BenchConfig, OutputFormat};
//!
//! let config = BenchConfig::quick().with_format(OutputFormat::Csv);
//! let rows = run_benchmark(config, std::io::stdout()).unwrap();
//! assert_eq!(rows.len(), 6);
//! ```

#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod config;
pub mod containers;
pub mod error;
pub mod memory;
pub mod report;
pub mod runner;
pub mod statistics;
pub mod workload;

pub use config::{BenchConfig, OutputFormat};
pub use containers::{BoxedVec, StaticVec};
pub use error::{BenchError, Result};
pub use memory::{CacheEvictor, CacheScrubber, GlobalScrubber};
pub use report::{CsvWriter, ReportWriter, ResultRow, TableWriter};
pub use runner::{run_benchmark, Runner};
pub use statistics::{measure, Clock, Harness, MonotonicClock, Stats};
pub use workload::{gen_indices, IndexSequence, Record, RecordStore, Strategy};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library (logs the version)
pub fn init() {
    log::debug!("Initializing layout-bench v{}", VERSION);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        init();
        assert!(VERSION.contains('.'));
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }

    #[test]
    fn test_re_exports() {
        let _vec = StaticVec::<Record>::new();
        let _boxed: BoxedVec<Record> = Vec::new();
        let _err = BenchError::configuration("test");
        assert!(std::any::type_name::<Result<()>>().contains("BenchError"));
    }
}

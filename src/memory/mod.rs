//! Memory-state helpers for measurement runs

pub mod cache;

pub use cache::{CacheEvictor, CacheScrubber, GlobalScrubber, DEFAULT_SCRATCH_WORDS};

//! Cache normalization between trials
//!
//! A trial that runs right after another one inherits whatever the previous
//! trial left in the CPU caches. [`CacheScrubber`] overwrites a scratch buffer
//! larger than the last-level cache with random words so every trial starts
//! from a comparably cold cache. Random words keep zero-page and memory
//! compression shortcuts from making the pass cheaper than a real eviction.

use crate::error::{BenchError, Result};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Default scratch size in 64-bit words (136 MiB)
pub const DEFAULT_SCRATCH_WORDS: usize = 17 * 1024 * 1024;

/// Something that can be asked to evict benchmark data from the caches
pub trait CacheEvictor {
    /// Push previously touched data out of the caches
    fn evict(&mut self);
}

/// Owns a scratch buffer and the generator used to fill it
pub struct CacheScrubber {
    scratch: Box<[u64]>,
    rng: StdRng,
}

impl CacheScrubber {
    /// Allocate a scrubber with a scratch buffer of `words` 64-bit words
    pub fn with_words(words: usize) -> Result<Self> {
        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(words)
            .map_err(|_| BenchError::out_of_memory(words.saturating_mul(8)))?;
        scratch.resize(words, 0u64);

        log::debug!("Allocated cache scratch buffer of {} bytes", words * 8);

        Ok(Self {
            scratch: scratch.into_boxed_slice(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Size of the scratch buffer in bytes
    pub fn scratch_bytes(&self) -> usize {
        self.scratch.len() * 8
    }

    /// Overwrite the whole scratch buffer with fresh random words
    pub fn scrub(&mut self) {
        for word in self.scratch.iter_mut() {
            *word = self.rng.next_u64();
        }
        std::hint::black_box(&self.scratch);
    }

    #[cfg(test)]
    fn scratch(&self) -> &[u64] {
        &self.scratch
    }
}

impl CacheEvictor for CacheScrubber {
    fn evict(&mut self) {
        self.scrub();
    }
}

/// Process-wide scrubber, created on first use and never torn down
static GLOBAL_SCRUBBER: Lazy<Mutex<Option<CacheScrubber>>> = Lazy::new(|| Mutex::new(None));

/// Handle to the process-wide scrubber
///
/// The scratch buffer is allocated on the first call to [`GlobalScrubber::acquire`]
/// and reused by every handle afterwards. A later request for a larger buffer
/// replaces it; the buffer never shrinks.
#[derive(Debug, Clone, Copy)]
pub struct GlobalScrubber {
    _private: (),
}

impl GlobalScrubber {
    /// Get a handle whose shared scratch buffer holds at least `words` words
    pub fn acquire(words: usize) -> Result<Self> {
        let mut slot = GLOBAL_SCRUBBER.lock();
        let held = slot.as_ref().map_or(0, |s| s.scratch.len());
        if held < words {
            if held > 0 {
                log::debug!("Growing cache scratch buffer from {} to {} words", held, words);
            }
            // Release the old buffer before allocating the larger one.
            *slot = None;
            *slot = Some(CacheScrubber::with_words(words)?);
        }
        Ok(Self { _private: () })
    }

    /// Size of the shared scratch buffer in bytes
    pub fn scratch_bytes(&self) -> usize {
        GLOBAL_SCRUBBER.lock().as_ref().map_or(0, |s| s.scratch_bytes())
    }
}

impl CacheEvictor for GlobalScrubber {
    fn evict(&mut self) {
        if let Some(scrubber) = GLOBAL_SCRUBBER.lock().as_mut() {
            scrubber.scrub();
        }
    }
}

impl<E: CacheEvictor + ?Sized> CacheEvictor for &mut E {
    fn evict(&mut self) {
        (**self).evict();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scrubber_size() {
        let scrubber = CacheScrubber::with_words(1024).unwrap();
        assert_eq!(scrubber.scratch_bytes(), 8192);
    }

    #[test]
    fn test_scrub_fills_with_random_words() {
        let mut scrubber = CacheScrubber::with_words(4096).unwrap();
        assert!(scrubber.scratch().iter().all(|&w| w == 0));

        scrubber.scrub();
        let first: Vec<u64> = scrubber.scratch().to_vec();
        assert!(first.iter().any(|&w| w != 0));

        scrubber.evict();
        assert_ne!(first.as_slice(), scrubber.scratch());
    }

    #[test]
    fn test_oversized_request_fails() {
        let err = CacheScrubber::with_words(usize::MAX).err().unwrap();
        assert_eq!(err.category(), "memory");
    }

    #[test]
    fn test_global_scrubber_is_shared() {
        let mut a = GlobalScrubber::acquire(512).unwrap();
        let mut b = GlobalScrubber::acquire(2048).unwrap();
        a.evict();
        b.evict();

        assert!(a.scratch_bytes() >= 2048 * 8);
    }

    #[test]
    fn test_global_scrubber_grows_for_larger_request() {
        let small = GlobalScrubber::acquire(1024).unwrap();
        assert!(small.scratch_bytes() >= 1024 * 8);

        let large = GlobalScrubber::acquire(64 * 1024).unwrap();
        assert!(large.scratch_bytes() >= 64 * 1024 * 8);

        let again = GlobalScrubber::acquire(1024).unwrap();
        assert!(again.scratch_bytes() >= 64 * 1024 * 8);
    }
}

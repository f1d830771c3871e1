//! Repeated-trial timing
//!
//! A [`Harness`] runs a workload a fixed number of times, reading a
//! [`Clock`] immediately before and after each run and asking a
//! [`CacheEvictor`] to cool the caches between runs. Eviction happens
//! outside the timed region.

use super::Stats;
use crate::error::Result;
use crate::memory::{CacheEvictor, GlobalScrubber, DEFAULT_SCRATCH_WORDS};
use std::time::{Duration, Instant};

/// Source of monotonic timestamps
pub trait Clock {
    /// Time elapsed since this clock's origin
    fn now(&mut self) -> Duration;
}

/// Clock backed by [`std::time::Instant`]
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Create a clock whose origin is the current instant
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&mut self) -> Duration {
        self.origin.elapsed()
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    #[inline]
    fn now(&mut self) -> Duration {
        (**self).now()
    }
}

/// Runs workloads trial by trial and reduces the samples to [`Stats`]
#[derive(Debug)]
pub struct Harness<C, E> {
    clock: C,
    evictor: E,
}

impl Harness<MonotonicClock, GlobalScrubber> {
    /// Harness with the monotonic clock and the process-wide scrubber
    pub fn with_scratch_words(words: usize) -> Result<Self> {
        Ok(Self::new(MonotonicClock::new(), GlobalScrubber::acquire(words)?))
    }
}

impl<C: Clock, E: CacheEvictor> Harness<C, E> {
    /// Create a harness from a clock and an evictor
    pub fn new(clock: C, evictor: E) -> Self {
        Self { clock, evictor }
    }

    /// Time `trials` runs of `workload`, in microseconds
    pub fn measure<F: FnMut()>(&mut self, trials: usize, mut workload: F) -> Stats {
        let mut samples = Vec::with_capacity(trials);

        for _ in 0..trials {
            let t0 = self.clock.now();
            workload();
            let t1 = self.clock.now();

            self.evictor.evict();

            samples.push(t1.saturating_sub(t0).as_nanos() as f64 / 1_000.0);
        }

        let stats = Stats::from_samples(&samples);
        log::trace!(
            "{} trials: mean {:.3}us ci95 {:.3}us",
            trials,
            stats.mean,
            stats.ci95
        );
        stats
    }

    /// Get the evictor
    pub fn evictor_mut(&mut self) -> &mut E {
        &mut self.evictor
    }
}

/// Time `trials` runs of `workload` with the default clock and scrubber
pub fn measure<F: FnMut()>(workload: F, trials: usize) -> Result<Stats> {
    let mut harness = Harness::with_scratch_words(DEFAULT_SCRATCH_WORDS)?;
    Ok(harness.measure(trials, workload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Advances by a fixed step on every end-of-trial read
    struct StepClock {
        t: Duration,
        step: Duration,
        reads: usize,
    }

    impl Clock for StepClock {
        fn now(&mut self) -> Duration {
            if self.reads % 2 == 1 {
                self.t += self.step;
            }
            self.reads += 1;
            self.t
        }
    }

    #[derive(Default)]
    struct CountingEvictor {
        calls: usize,
    }

    impl CacheEvictor for CountingEvictor {
        fn evict(&mut self) {
            self.calls += 1;
        }
    }

    #[test]
    fn test_measure_runs_every_trial() {
        let clock = StepClock {
            t: Duration::ZERO,
            step: Duration::from_micros(3),
            reads: 0,
        };
        let mut harness = Harness::new(clock, CountingEvictor::default());
        let runs = Cell::new(0);

        let stats = harness.measure(25, || runs.set(runs.get() + 1));

        assert_eq!(runs.get(), 25);
        assert_eq!(harness.evictor_mut().calls, 25);
        assert!((stats.mean - 3.0).abs() < 1e-9);
        assert!(stats.ci95.abs() < 1e-9);
    }

    #[test]
    fn test_zero_trials() {
        let mut harness = Harness::new(MonotonicClock::new(), CountingEvictor::default());
        let stats = harness.measure(0, || unreachable!());
        assert_eq!(stats, Stats::default());
        assert_eq!(harness.evictor_mut().calls, 0);
    }

    #[test]
    fn test_monotonic_clock_advances() {
        let mut clock = MonotonicClock::new();
        let a = clock.now();
        std::thread::sleep(Duration::from_millis(1));
        let b = clock.now();
        assert!(b > a);
    }

    #[test]
    fn test_real_clock_non_negative() {
        let mut harness = Harness::new(MonotonicClock::new(), CountingEvictor::default());
        let stats = harness.measure(10, || {
            std::hint::black_box((0..1000u64).sum::<u64>());
        });
        assert!(stats.mean >= 0.0);
        assert!(stats.ci95 >= 0.0);
    }
}

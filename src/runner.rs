//! Measurement run driver
//!
//! For each configured size, for each strategy, the runner times
//! create+destroy, iterate and access, then streams the finished row to a
//! [`ReportWriter`]. The first error aborts the run; nothing partial is
//! reported after it.

use crate::config::BenchConfig;
use crate::containers::{BoxedVec, StaticVec};
use crate::error::Result;
use crate::memory::{CacheEvictor, GlobalScrubber};
use crate::report::{writer_for, ReportWriter, ResultRow};
use crate::statistics::{Clock, Harness, MonotonicClock};
use crate::workload::{access, create_and_destruct, iterate, Record, RecordStore, Strategy};
use std::io::Write;

/// Drives a full run over a [`BenchConfig`]
pub struct Runner<C, E> {
    config: BenchConfig,
    harness: Harness<C, E>,
}

impl Runner<MonotonicClock, GlobalScrubber> {
    /// Runner with the monotonic clock and the process-wide scrubber
    pub fn from_config(config: BenchConfig) -> Result<Self> {
        config.validate()?;
        let harness = Harness::with_scratch_words(config.scratch_words)?;
        Ok(Self { config, harness })
    }
}

impl<C: Clock, E: CacheEvictor> Runner<C, E> {
    /// Runner with a caller-supplied harness
    pub fn with_harness(config: BenchConfig, harness: Harness<C, E>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, harness })
    }

    /// The configuration being run
    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Measure all three operations for one size and strategy
    pub fn measure_row(&mut self, size: usize, strategy: Strategy) -> Result<ResultRow> {
        match strategy {
            Strategy::Contiguous => self.measure_store::<StaticVec<Record>>(size),
            Strategy::Indirect => self.measure_store::<BoxedVec<Record>>(size),
        }
    }

    fn measure_store<S: RecordStore>(&mut self, size: usize) -> Result<ResultRow> {
        let trials = self.config.trials;
        let create_destroy = create_and_destruct::<S, _, _>(&mut self.harness, size, trials)?;
        let iterate = iterate::<S, _, _>(&mut self.harness, size, trials)?;
        let access = access::<S, _, _>(&mut self.harness, size, trials)?;

        Ok(ResultRow {
            size,
            strategy: S::STRATEGY,
            create_destroy,
            iterate,
            access,
        })
    }

    /// Run every (size, strategy) pair, streaming rows to `writer`
    pub fn run<R: ReportWriter + ?Sized>(&mut self, writer: &mut R) -> Result<Vec<ResultRow>> {
        log::info!(
            "Measuring {} sizes x {} strategies, {} trials each",
            self.config.sizes.len(),
            Strategy::ALL.len(),
            self.config.trials
        );

        writer.write_header()?;

        let sizes = self.config.sizes.clone();
        let mut rows = Vec::with_capacity(sizes.len() * Strategy::ALL.len());
        for size in sizes {
            for strategy in Strategy::ALL {
                let row = self.measure_row(size, strategy)?;
                log::info!(
                    "size {} {}: create+destroy {:.3}us iterate {:.3}us access {:.3}us",
                    size,
                    strategy,
                    row.create_destroy.mean,
                    row.iterate.mean,
                    row.access.mean
                );
                writer.write_row(&row)?;
                rows.push(row);
            }
        }

        writer.finish()?;
        Ok(rows)
    }
}

/// Run `config` with the default harness, writing the report to `out`
pub fn run_benchmark<W: Write>(config: BenchConfig, out: W) -> Result<Vec<ResultRow>> {
    let format = config.format;
    let mut runner = Runner::from_config(config)?;
    let mut writer = writer_for(format, out);
    runner.run(writer.as_mut())
}

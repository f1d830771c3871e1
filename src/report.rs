//! Report rendering
//!
//! A run produces one [`ResultRow`] per (size, strategy). Rows are handed to
//! a [`ReportWriter`] as soon as they exist so a long run shows progress.
//! All values are microseconds.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::statistics::Stats;
use crate::workload::Strategy;
use std::io::Write;

const SIZE_WIDTH: usize = 12;
const CONTAINER_WIDTH: usize = 22;
const METRIC_WIDTH: usize = 25;
const RULE_WIDTH: usize = 120;

/// CSV column names, in order
pub const CSV_HEADER: [&str; 8] = [
    "Size",
    "Container",
    "CreateDestroyMean",
    "CreateDestroyCI95",
    "IterateMean",
    "IterateCI95",
    "AccessMean",
    "AccessCI95",
];

/// Results of the three operations for one size and one strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResultRow {
    /// Number of records
    pub size: usize,
    /// Storage strategy
    pub strategy: Strategy,
    /// Build plus drop
    pub create_destroy: Stats,
    /// In-order traversal
    pub iterate: Stats,
    /// Random-order reads
    pub access: Stats,
}

impl ResultRow {
    /// The three measurements in column order
    pub fn metrics(&self) -> [Stats; 3] {
        [self.create_destroy, self.iterate, self.access]
    }
}

/// Sink for a stream of result rows
pub trait ReportWriter {
    /// Write whatever precedes the first row
    fn write_header(&mut self) -> Result<()>;

    /// Write one row
    fn write_row(&mut self, row: &ResultRow) -> Result<()>;

    /// Flush buffered output
    fn finish(&mut self) -> Result<()>;
}

/// Fixed-width table
pub struct TableWriter<W: Write> {
    out: W,
}

impl<W: Write> TableWriter<W> {
    /// Create a table writer over `out`
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Recover the underlying sink
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ReportWriter for TableWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "{:<sw$} {:<cw$} {:>mw$} {:>mw$} {:>mw$}",
            "Size",
            "Container",
            "Create+Destroy (µs ±95%CI)",
            "Iterate (µs ±95%CI)",
            "Access (µs ±95%CI)",
            sw = SIZE_WIDTH,
            cw = CONTAINER_WIDTH,
            mw = METRIC_WIDTH,
        )?;
        writeln!(self.out, "{:-<w$}", "", w = RULE_WIDTH)?;
        Ok(())
    }

    fn write_row(&mut self, row: &ResultRow) -> Result<()> {
        write!(
            self.out,
            "{:<sw$} {:<cw$}",
            row.size,
            row.strategy.label(),
            sw = SIZE_WIDTH,
            cw = CONTAINER_WIDTH,
        )?;
        for stats in row.metrics() {
            write!(self.out, " {:>15.3} ±{:>10.3}", stats.mean, stats.ci95)?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// CSV rows with a header line
pub struct CsvWriter<W: Write> {
    out: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a CSV writer over `out`
    pub fn new(out: W) -> Self {
        Self {
            out: csv::Writer::from_writer(out),
        }
    }

    /// Flush and recover the underlying sink
    pub fn into_inner(self) -> Result<W> {
        self.out
            .into_inner()
            .map_err(|e| crate::error::BenchError::Io(e.into_error()))
    }
}

impl<W: Write> ReportWriter for CsvWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        self.out.write_record(CSV_HEADER)?;
        Ok(())
    }

    fn write_row(&mut self, row: &ResultRow) -> Result<()> {
        let mut record = Vec::with_capacity(CSV_HEADER.len());
        record.push(row.size.to_string());
        record.push(row.strategy.label().to_string());
        for stats in row.metrics() {
            record.push(format!("{:.6}", stats.mean));
            record.push(format!("{:.6}", stats.ci95));
        }
        self.out.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Writer for `format` over `out`
pub fn writer_for<'a, W: Write + 'a>(format: OutputFormat, out: W) -> Box<dyn ReportWriter + 'a> {
    match format {
        OutputFormat::Table => Box::new(TableWriter::new(out)),
        OutputFormat::Csv => Box::new(CsvWriter::new(out)),
    }
}

//! Command-line entry point
//!
//! Runs the compiled-in measurement plan and prints the report to stdout.
//! Logs go to stderr; set `RUST_LOG=info` to follow progress.

use clap::Parser;
use env_logger::Env;
use layout_bench::{run_benchmark, BenchConfig, OutputFormat};
use std::io;
use std::process::ExitCode;

/// Compare contiguous and boxed record storage
#[derive(Debug, Parser)]
#[command(name = "layout-bench", version, about)]
struct Cli {
    /// Emit CSV instead of a table
    #[arg(long)]
    csv: bool,
}

impl Cli {
    fn output_format(&self) -> OutputFormat {
        if self.csv {
            OutputFormat::Csv
        } else {
            OutputFormat::Table
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    layout_bench::init();

    let cli = Cli::parse();
    let config = BenchConfig::default().with_format(cli.output_format());

    match run_benchmark(config, io::stdout().lock()) {
        Ok(rows) => {
            log::info!("Finished {} rows", rows.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Run aborted ({}): {}", e.category(), e);
            ExitCode::FAILURE
        }
    }
}

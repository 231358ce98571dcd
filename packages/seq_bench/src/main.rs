#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(coverage_nightly, coverage(off))]

//! Binary entry point for the sequence container benchmarks.
//!
//! Logs go to stderr and are filtered through `RUST_LOG`, defaulting to `info`. The report goes
//! to stdout unless an output file is given.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use seq_bench::{Config, Family, Format, Result, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Measures sequence container operations across element types and allocation strategies.
#[derive(FromArgs)]
struct Args {
    /// report format (text, csv, html)
    #[argh(option)]
    format: Option<Format>,

    /// write the report to this file instead of stdout
    #[argh(option)]
    output: Option<PathBuf>,

    /// trials averaged into each measured point (default 7)
    #[argh(option)]
    repetitions: Option<u32>,

    /// divide every container size by this factor (default 1)
    #[argh(option)]
    scale: Option<usize>,

    /// benchmark family to run, repeatable (default: all)
    #[argh(option)]
    family: Vec<Family>,
}

fn config_from(args: Args) -> Result<Config> {
    let mut config = Config::default().with_families(args.family);

    if let Some(format) = args.format {
        config = config.with_format(format);
    }

    if let Some(path) = args.output {
        config = config.with_output(path);
    }

    if let Some(repetitions) = args.repetitions {
        config = config.with_repetitions(repetitions)?;
    }

    if let Some(scale) = args.scale {
        config = config.with_scale(scale)?;
    }

    Ok(config)
}

fn execute(config: &Config) -> Result<()> {
    if let Some(path) = config.output() {
        let mut out = BufWriter::new(File::create(path)?);
        run(config, &mut out)?;
        out.flush()?;

        info!(path = %path.display(), "report written");
        Ok(())
    } else {
        run(config, &mut io::stdout().lock())
    }
}

// Binary entry point - mutations would require subprocess testing which is impractical.
#[cfg_attr(test, mutants::skip)]
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Args = argh::from_env();

    match config_from(args).and_then(|config| execute(&config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

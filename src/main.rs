//! snnkit CLI
//!
//! Command-line front end for the conversion utilities.
//!
//! # Usage
//!
//! ```bash
//! # Reduce every F32 tensor to Q2.6 and write a report
//! snnkit quantize model.safetensors --output model_q26.safetensors --format Q2.6 --report q26.json
//!
//! # Binarize with seeded stochastic levels
//! snnkit quantize model.safetensors -o model_bin.safetensors --binarize 1.0 --stochastic --seed 7
//!
//! # Confidence interval of a measured accuracy
//! snnkit wilson --p 0.981 --n 10000
//!
//! # Parse a layer label
//! snnkit label 03Conv2D_3x32x32
//!
//! # Logarithmic sweep 10^-3 .. 10^0
//! snnkit range --start -3 --stop 0 --num 3 --method log
//! ```
//!
//! Diagnostics go to stderr and follow `RUST_LOG` (default `snnkit=info`,
//! `snnkit=debug` with `--verbose`).

use clap::Parser;
use snnkit::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "snnkit=debug"
    } else {
        "snnkit=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

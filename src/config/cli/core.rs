//! Core CLI types - Cli and Command

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::args::{LabelArgs, QuantizeArgs, RangeArgs, WilsonArgs};

/// snnkit: utilities for converting ANNs to spiking networks
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "snnkit")]
#[command(version)]
#[command(
    about = "Fixed-point quantization, binarization and evaluation utilities for ANN-to-SNN conversion"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Toolbox configuration file (YAML)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Reduce the precision of (or binarize) every F32 tensor in a SafeTensors file
    Quantize(QuantizeArgs),

    /// Wilson score confidence interval half-width
    Wilson(WilsonArgs),

    /// Parse a layer label into index, name and shape
    Label(LabelArgs),

    /// Generate a parameter sweep
    Range(RangeArgs),
}

/// Parse command line arguments
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}

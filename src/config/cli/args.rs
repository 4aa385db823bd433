//! Per-command argument types

use crate::quant::QFormat;
use crate::stats::RangeMethod;
use clap::Parser;
use std::path::PathBuf;

/// Arguments for the quantize command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct QuantizeArgs {
    /// Path to SafeTensors model file
    #[arg(value_name = "MODEL")]
    pub model: PathBuf,

    /// Output path for the quantized SafeTensors file
    #[arg(short, long)]
    pub output: PathBuf,

    /// Fixed-point format, e.g. Q2.6
    #[arg(short, long, value_name = "Qm.f")]
    pub format: Option<QFormat>,

    /// Binarize weights to ±H instead of reducing precision
    #[arg(short, long, value_name = "H", allow_negative_numbers = true)]
    pub binarize: Option<f32>,

    /// Draw binary levels stochastically
    #[arg(long, requires = "binarize")]
    pub stochastic: bool,

    /// Seed for stochastic binarization
    #[arg(long, requires = "stochastic")]
    pub seed: Option<u64>,

    /// Write a JSON report of per-tensor statistics
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Overwrite existing output files without asking
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the wilson command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct WilsonArgs {
    /// Observed proportion in [0, 1]
    #[arg(short, long)]
    pub p: f64,

    /// Number of samples
    #[arg(short, long)]
    pub n: u64,
}

/// Arguments for the label command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct LabelArgs {
    /// Layer label, e.g. 03Conv2D_3x32x32
    #[arg(value_name = "LABEL")]
    pub label: String,
}

/// Arguments for the range command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RangeArgs {
    /// Lower end of the range
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    pub start: f64,

    /// Upper end of the range
    #[arg(long, default_value = "1", allow_negative_numbers = true)]
    pub stop: f64,

    /// Number of samples
    #[arg(long, default_value = "10")]
    pub num: usize,

    /// Sampling method (linear, log, random)
    #[arg(short, long, default_value = "linear")]
    pub method: RangeMethod,

    /// Seed for the random method
    #[arg(long)]
    pub seed: Option<u64>,
}

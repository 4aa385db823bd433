//! CLI argument parsing
//!
//! # Usage
//!
//! ```bash
//! snnkit quantize model.safetensors -o model_q26.safetensors --format Q2.6
//! snnkit quantize model.safetensors -o model_bin.safetensors --binarize 1.0 --stochastic --seed 7
//! snnkit wilson --p 0.93 --n 10000
//! snnkit label 03Conv2D_3x32x32
//! snnkit range --start -3 --stop 0 --num 4 --method log
//! ```

mod args;
mod core;

pub use args::{LabelArgs, QuantizeArgs, RangeArgs, WilsonArgs};
pub use core::{parse_args, Cli, Command};

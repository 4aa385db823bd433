//! # snnkit
//!
//! Utilities for converting analog neural networks into spiking networks.
//!
//! ## Architecture
//!
//! - `quant`: fixed-point precision reduction, binarization and hard
//!   activations over one buffer abstraction with two backends
//! - `autograd`: tape-based tensors whose quantizers pass gradients straight
//!   through
//! - `stats`: Wilson score intervals and parameter sweeps
//! - `label`: layer label parsing
//! - `eval`: top-k accuracy
//! - `io`: JSON export, SafeTensors weights, overwrite prompts
//! - `helpers`: native helper libraries loaded at runtime
//! - `config`: YAML toolbox configuration and CLI arguments
//!
//! ## Example
//!
//! ```
//! use ndarray::array;
//! use snnkit::{quantized_relu, reduce_precision};
//!
//! let x = array![0.30f32, -2.70, 9.0];
//! assert_eq!(reduce_precision(&x, 2, 3), array![0.25f32, -2.75, 3.875]);
//! assert_eq!(quantized_relu(&x, 2, 3), array![0.25f32, 0.0, 3.875]);
//! ```

pub mod autograd;
pub mod cli;
pub mod config;
pub mod error;
pub mod eval;
pub mod helpers;
pub mod io;
pub mod label;
pub mod quant;
pub mod stats;

pub use autograd::Tensor;
pub use error::{Error, Result};
pub use quant::{
    binarize, binarize_stochastic, binary_sigmoid, binary_tanh, clamped_relu, hard_sigmoid,
    quantized_relu, reduce_precision, QFormat, QuantBuffer,
};

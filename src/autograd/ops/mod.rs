//! Autograd operations with backward passes
//!
//! Unary ops record a local-derivative mask; `add`, `mul` and `sum` carry
//! their own backward structs.

mod activations;
mod basic;
mod elementwise;
mod quantize;

pub use activations::{clamped_relu, quantized_relu, relu};
pub use basic::{add, mul, scale, sum};
pub use quantize::{
    binarize, binarize_stochastic, binary_sigmoid, binary_tanh, hard_sigmoid, reduce_precision,
};

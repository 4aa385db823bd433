//! Quantization autograd operations with straight-through gradients
//!
//! Rounding has zero derivative almost everywhere, so backward passes use
//! the Straight-Through Estimator: the incoming gradient is passed unchanged
//! wherever the input lies in the op's linear region and zeroed where the
//! op saturates.

use super::elementwise::{unary_op, unary_op_with_data};
use crate::autograd::Tensor;
use crate::quant::fixed_point::{self, QFormat};
use rand::Rng;

/// Reduce precision to `format` (round to grid, then saturate)
pub fn reduce_precision(a: &Tensor, format: QFormat) -> Tensor {
    unary_op(
        a,
        |x| format.reduce(x),
        |x| if format.in_range(x) { 1.0 } else { 0.0 },
    )
}

/// `clip((x + 1) / 2, 0, 1)`
pub fn hard_sigmoid(a: &Tensor) -> Tensor {
    unary_op(a, fixed_point::hard_sigmoid, hard_sigmoid_slope)
}

/// Hard sigmoid rounded to `{0, 1}`, hard-sigmoid slope in backward
pub fn binary_sigmoid(a: &Tensor) -> Tensor {
    unary_op(a, fixed_point::binary_sigmoid, hard_sigmoid_slope)
}

/// Sign in `{-1, 0, 1}`, gradient passed where `|x| <= 1`
pub fn binary_tanh(a: &Tensor) -> Tensor {
    unary_op(a, fixed_point::binary_tanh, |x| {
        if x.abs() <= 1.0 {
            1.0
        } else {
            0.0
        }
    })
}

/// Deterministic binarization to `{-h, +h}`
pub fn binarize(a: &Tensor, h: f32) -> Tensor {
    unary_op(a, |w| fixed_point::binarize(w, h), |w| binarize_slope(w, h))
}

/// Stochastic binarization to `{-h, +h}`, one uniform draw per element
pub fn binarize_stochastic<R: Rng + ?Sized>(a: &Tensor, h: f32, rng: &mut R) -> Tensor {
    let data = a
        .data()
        .mapv(|w| fixed_point::binarize_with_draw(w, h, rng.random::<f32>()));
    unary_op_with_data(a, data, |w| binarize_slope(w, h))
}

fn hard_sigmoid_slope(x: f32) -> f32 {
    if x > -1.0 && x < 1.0 {
        0.5
    } else {
        0.0
    }
}

fn binarize_slope(w: f32, h: f32) -> f32 {
    if (w / h).abs() <= 1.0 {
        1.0
    } else {
        0.0
    }
}

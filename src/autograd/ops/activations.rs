//! Activation autograd operations: relu, clamped_relu, quantized_relu

use super::elementwise::unary_op;
use super::quantize::reduce_precision;
use crate::autograd::Tensor;
use crate::quant::fixed_point::{self, QFormat};

/// ReLU activation
pub fn relu(a: &Tensor) -> Tensor {
    unary_op(
        a,
        |x| fixed_point::relu(x, None),
        |x| if x > 0.0 { 1.0 } else { 0.0 },
    )
}

/// ReLU capped at `max_value` whose outputs below `threshold` are zeroed
///
/// Gradient is 1 where the input passes through unchanged, 0 in the dead
/// zone and on the ceiling.
pub fn clamped_relu(a: &Tensor, threshold: f32, max_value: Option<f32>) -> Tensor {
    unary_op(
        a,
        |x| fixed_point::clamped_relu(x, threshold, max_value),
        |x| {
            let below_cap = max_value.map_or(true, |cap| x < cap);
            if x > 0.0 && below_cap && fixed_point::relu(x, max_value) >= threshold {
                1.0
            } else {
                0.0
            }
        },
    )
}

/// ReLU of the input reduced to `format`
///
/// Precision is reduced first; gradients chain through both graph nodes.
pub fn quantized_relu(a: &Tensor, format: QFormat) -> Tensor {
    relu(&reduce_precision(a, format))
}

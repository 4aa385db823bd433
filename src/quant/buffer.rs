//! Numeric buffer abstraction with eager and computation-graph backends

use super::fixed_point::{self, QFormat};
use crate::autograd::{self, Tensor};
use ndarray::{Array, Dimension};
use rand::Rng;

/// A buffer of `f32` values the quantizers can transform
///
/// Every method returns a new buffer of the same shape and leaves `self`
/// untouched. Implementations must route each element through the kernels
/// in [`fixed_point`] so that all backends produce identical values.
pub trait QuantBuffer: Sized {
    /// Round to the `format` grid, then saturate to `±format.max_value()`
    fn reduce_precision(&self, format: QFormat) -> Self;

    /// `relu(reduce_precision(x))`
    fn quantized_relu(&self, format: QFormat) -> Self;

    /// ReLU capped at `max_value` with outputs below `threshold` zeroed
    fn clamped_relu(&self, threshold: f32, max_value: Option<f32>) -> Self;

    /// `clip((x + 1) / 2, 0, 1)`
    fn hard_sigmoid(&self) -> Self;

    /// Hard sigmoid rounded to `{0, 1}`
    fn binary_sigmoid(&self) -> Self;

    /// Sign in `{-1, 0, 1}`
    fn binary_tanh(&self) -> Self;

    /// Deterministic binarization to `{-h, +h}`
    fn binarize(&self, h: f32) -> Self;

    /// Stochastic binarization to `{-h, +h}`
    ///
    /// Each element becomes `+h` with probability `hard_sigmoid(w / h)`.
    /// Elements are visited in logical order, one `f32` draw each, so equal
    /// seeds give equal outputs across backends.
    fn binarize_stochastic<R: Rng + ?Sized>(&self, h: f32, rng: &mut R) -> Self;
}

/// Eager backend over any-dimensional arrays
impl<D: Dimension> QuantBuffer for Array<f32, D> {
    fn reduce_precision(&self, format: QFormat) -> Self {
        self.mapv(|x| format.reduce(x))
    }

    fn quantized_relu(&self, format: QFormat) -> Self {
        self.mapv(|x| fixed_point::relu(format.reduce(x), None))
    }

    fn clamped_relu(&self, threshold: f32, max_value: Option<f32>) -> Self {
        self.mapv(|x| fixed_point::clamped_relu(x, threshold, max_value))
    }

    fn hard_sigmoid(&self) -> Self {
        self.mapv(fixed_point::hard_sigmoid)
    }

    fn binary_sigmoid(&self) -> Self {
        self.mapv(fixed_point::binary_sigmoid)
    }

    fn binary_tanh(&self) -> Self {
        self.mapv(fixed_point::binary_tanh)
    }

    fn binarize(&self, h: f32) -> Self {
        self.mapv(|w| fixed_point::binarize(w, h))
    }

    fn binarize_stochastic<R: Rng + ?Sized>(&self, h: f32, rng: &mut R) -> Self {
        // mapv walks in memory order; draw in logical order instead
        let mut out = self.clone();
        for w in out.iter_mut() {
            *w = fixed_point::binarize_with_draw(*w, h, rng.random::<f32>());
        }
        out
    }
}

/// Computation-graph backend with straight-through gradients
impl QuantBuffer for Tensor {
    fn reduce_precision(&self, format: QFormat) -> Self {
        autograd::reduce_precision(self, format)
    }

    fn quantized_relu(&self, format: QFormat) -> Self {
        autograd::quantized_relu(self, format)
    }

    fn clamped_relu(&self, threshold: f32, max_value: Option<f32>) -> Self {
        autograd::clamped_relu(self, threshold, max_value)
    }

    fn hard_sigmoid(&self) -> Self {
        autograd::hard_sigmoid(self)
    }

    fn binary_sigmoid(&self) -> Self {
        autograd::binary_sigmoid(self)
    }

    fn binary_tanh(&self) -> Self {
        autograd::binary_tanh(self)
    }

    fn binarize(&self, h: f32) -> Self {
        autograd::binarize(self, h)
    }

    fn binarize_stochastic<R: Rng + ?Sized>(&self, h: f32, rng: &mut R) -> Self {
        autograd::binarize_stochastic(self, h, rng)
    }
}

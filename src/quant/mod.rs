//! Reduced-precision transforms for weights and activations
//!
//! Emulates the arithmetic of fixed-point and binary hardware during
//! network conversion:
//! - `Qm.f` fixed-point reduction with round-half-to-even and saturation
//! - quantized and clamped ReLU activations
//! - deterministic and stochastic binarization to `{-h, +h}`
//!
//! Every transform is generic over [`QuantBuffer`], implemented for eager
//! `ndarray` arrays and for graph [`Tensor`](crate::autograd::Tensor)s, so a
//! conversion pipeline can swap one backend for the other without changing
//! results.
//!
//! ```
//! use ndarray::array;
//! use snnkit::quant::reduce_precision;
//!
//! let w = array![[0.30f32, -2.70], [9.0, 0.0625]];
//! let q = reduce_precision(&w, 2, 3);
//! assert_eq!(q, array![[0.25f32, -2.75], [3.875, 0.0]]);
//! ```

mod buffer;
pub mod fixed_point;


pub use buffer::QuantBuffer;
pub use fixed_point::{QFormat, DEFAULT_BINARIZE_H, DEFAULT_CLAMP_THRESHOLD};

use rand::Rng;

/// Reduce `x` to fixed-point format `Qm.f`
///
/// # Panics
///
/// Panics if `m + f` exceeds [`fixed_point::MAX_TOTAL_BITS`].
pub fn reduce_precision<B: QuantBuffer>(x: &B, m: u32, f: u32) -> B {
    x.reduce_precision(QFormat::new(m, f))
}

/// ReLU applied after reducing `x` to `Qm.f`
///
/// # Panics
///
/// Panics if `m + f` exceeds [`fixed_point::MAX_TOTAL_BITS`].
pub fn quantized_relu<B: QuantBuffer>(x: &B, m: u32, f: u32) -> B {
    x.quantized_relu(QFormat::new(m, f))
}

/// ReLU with ceiling `max_value` and dead zone below `threshold`
pub fn clamped_relu<B: QuantBuffer>(x: &B, threshold: f32, max_value: Option<f32>) -> B {
    x.clamped_relu(threshold, max_value)
}

/// Deterministically round `w` to `{-h, +h}`
pub fn binarize<B: QuantBuffer>(w: &B, h: f32) -> B {
    w.binarize(h)
}

/// Stochastically round `w` to `{-h, +h}` using `rng`
pub fn binarize_stochastic<B: QuantBuffer, R: Rng + ?Sized>(w: &B, h: f32, rng: &mut R) -> B {
    w.binarize_stochastic(h, rng)
}

/// `clip((x + 1) / 2, 0, 1)`
pub fn hard_sigmoid<B: QuantBuffer>(x: &B) -> B {
    x.hard_sigmoid()
}

/// Round `x` to `{0, 1}` through the hard sigmoid
pub fn binary_sigmoid<B: QuantBuffer>(x: &B) -> B {
    x.binary_sigmoid()
}

/// Round `x` to its sign
pub fn binary_tanh<B: QuantBuffer>(x: &B) -> B {
    x.binary_tanh()
}

//! Fixed-point `Qm.f` format and the scalar kernels shared by every backend.
//!
//! All rounding is round-half-to-even, so `0.5` rounds to `0` and `1.5`
//! rounds to `2`. Both buffer backends call these functions element by
//! element; nothing else in the crate defines quantization arithmetic.

use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Default firing threshold of [`clamped_relu`]
pub const DEFAULT_CLAMP_THRESHOLD: f32 = 0.1;

/// Default binarization magnitude
pub const DEFAULT_BINARIZE_H: f32 = 1.0;

/// Widest `Qm.f` format, sign bit excluded, that fits a 32-bit word
pub const MAX_TOTAL_BITS: u32 = 31;

/// Fixed-point format with `int_bits` integer and `frac_bits` fractional bits
///
/// `int_bits + frac_bits` never exceeds [`MAX_TOTAL_BITS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QFormat {
    int_bits: u32,
    frac_bits: u32,
}

impl QFormat {
    /// # Panics
    ///
    /// Panics if `int_bits + frac_bits` exceeds [`MAX_TOTAL_BITS`]. Use
    /// [`QFormat::try_new`] for untrusted input.
    pub const fn new(int_bits: u32, frac_bits: u32) -> Self {
        assert!(
            (int_bits as u64) + (frac_bits as u64) <= MAX_TOTAL_BITS as u64,
            "fixed-point format exceeds 31 bits"
        );
        Self {
            int_bits,
            frac_bits,
        }
    }

    /// Checked constructor
    pub fn try_new(int_bits: u32, frac_bits: u32) -> Result<Self> {
        if u64::from(int_bits) + u64::from(frac_bits) > u64::from(MAX_TOTAL_BITS) {
            return Err(Error::InvalidArgument(format!(
                "fixed-point format Q{int_bits}.{frac_bits} exceeds {MAX_TOTAL_BITS} bits"
            )));
        }
        Ok(Self {
            int_bits,
            frac_bits,
        })
    }

    pub fn int_bits(&self) -> u32 {
        self.int_bits
    }

    pub fn frac_bits(&self) -> u32 {
        self.frac_bits
    }

    /// Scale factor `2^f`
    pub fn scale(&self) -> f32 {
        2f32.powi(self.frac_bits as i32)
    }

    /// Grid spacing `1 / 2^f`
    pub fn step(&self) -> f32 {
        self.scale().recip()
    }

    /// Largest f32 not above `2^m - 1/2^f`
    ///
    /// Past 24 significant bits the exact bound has no f32 representation;
    /// rounding it to nearest would land on `2^m`, so it is rounded toward
    /// zero instead.
    pub fn max_value(&self) -> f32 {
        let exact = 2f64.powi(self.int_bits as i32) - 2f64.powi(-(self.frac_bits as i32));
        let nearest = exact as f32;
        if f64::from(nearest) > exact {
            f32::from_bits(nearest.to_bits() - 1)
        } else {
            nearest
        }
    }

    /// Round `x` onto the grid, then saturate
    pub fn reduce(&self, x: f32) -> f32 {
        let n = self.scale();
        let max = self.max_value();
        ((x * n).round_ties_even() / n).clamp(-max, max)
    }

    /// Whether `x` lies inside the unsaturated range
    pub fn in_range(&self, x: f32) -> bool {
        let max = self.max_value();
        (-max..=max).contains(&x)
    }
}

impl fmt::Display for QFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}.{}", self.int_bits, self.frac_bits)
    }
}

impl FromStr for QFormat {
    type Err = Error;

    /// Parse `"Q3.4"`, `"q3.4"` or `"3.4"`
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let body = trimmed
            .strip_prefix('Q')
            .or_else(|| trimmed.strip_prefix('q'))
            .unwrap_or(trimmed);
        let invalid = || {
            Error::InvalidArgument(format!(
                "fixed-point format must look like 'Qm.f', got '{s}'"
            ))
        };
        let (m, f) = body.split_once('.').ok_or_else(invalid)?;
        let int_bits = m.parse::<u32>().map_err(|_| invalid())?;
        let frac_bits = f.parse::<u32>().map_err(|_| invalid())?;
        Self::try_new(int_bits, frac_bits)
    }
}

impl Serialize for QFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for QFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// `max(x, 0)`, capped at `max_value` when given
pub fn relu(x: f32, max_value: Option<f32>) -> f32 {
    let y = x.max(0.0);
    match max_value {
        Some(cap) => y.min(cap),
        None => y,
    }
}

/// ReLU with ceiling `max_value` whose outputs below `threshold` are zeroed
pub fn clamped_relu(x: f32, threshold: f32, max_value: Option<f32>) -> f32 {
    let y = relu(x, max_value);
    if y < threshold {
        0.0
    } else {
        y
    }
}

/// `clip((x + 1) / 2, 0, 1)`
pub fn hard_sigmoid(x: f32) -> f32 {
    ((x + 1.0) / 2.0).clamp(0.0, 1.0)
}

/// Round [`hard_sigmoid`] to `{0, 1}`
pub fn binary_sigmoid(x: f32) -> f32 {
    hard_sigmoid(x).round_ties_even()
}

/// Sign of `x` in `{-1, 0, 1}`; NaN stays NaN
pub fn binary_tanh(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        x
    }
}

/// Map a `{0, 1}` draw to `{-h, +h}`
///
/// Any non-zero value (NaN included) selects `+h`.
pub fn to_binary_level(bit: f32, h: f32) -> f32 {
    if bit != 0.0 {
        h
    } else {
        -h
    }
}

/// Deterministic binarization of a single weight
pub fn binarize(w: f32, h: f32) -> f32 {
    to_binary_level(hard_sigmoid(w / h).round_ties_even(), h)
}

/// Stochastic binarization given a uniform draw `u` in `[0, 1)`
///
/// Selects `+h` with probability `hard_sigmoid(w / h)`.
pub fn binarize_with_draw(w: f32, h: f32, u: f32) -> f32 {
    let p = hard_sigmoid(w / h);
    if u < p {
        h
    } else {
        -h
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_qformat_grid() {
        let q = QFormat::new(2, 3);
        assert_abs_diff_eq!(q.scale(), 8.0);
        assert_abs_diff_eq!(q.step(), 0.125);
        assert_abs_diff_eq!(q.max_value(), 3.875);
    }

    #[test]
    fn test_qformat_zero_frac_bits() {
        // f = 0 is an integer grid, not a shift underflow
        let q = QFormat::new(3, 0);
        assert_abs_diff_eq!(q.step(), 1.0);
        assert_abs_diff_eq!(q.max_value(), 7.0);
        assert_abs_diff_eq!(q.reduce(2.4), 2.0);
        assert_abs_diff_eq!(q.reduce(-100.0), -7.0);
    }

    #[test]
    fn test_qformat_zero_bits_collapses_to_zero() {
        let q = QFormat::new(0, 0);
        assert_abs_diff_eq!(q.max_value(), 0.0);
        assert_abs_diff_eq!(q.reduce(0.9), 0.0);
        assert_abs_diff_eq!(q.reduce(-0.9), 0.0);
    }

    #[test]
    fn test_reduce_rounds_half_to_even() {
        let q = QFormat::new(4, 0);
        assert_abs_diff_eq!(q.reduce(0.5), 0.0);
        assert_abs_diff_eq!(q.reduce(1.5), 2.0);
        assert_abs_diff_eq!(q.reduce(2.5), 2.0);
        assert_abs_diff_eq!(q.reduce(-0.5), 0.0);
    }

    #[test]
    fn test_reduce_saturates() {
        let q = QFormat::new(1, 2);
        assert_abs_diff_eq!(q.reduce(10.0), 1.75);
        assert_abs_diff_eq!(q.reduce(-10.0), -1.75);
    }

    #[test]
    fn test_reduce_non_finite() {
        let q = QFormat::new(2, 2);
        assert!(q.reduce(f32::NAN).is_nan());
        assert_abs_diff_eq!(q.reduce(f32::INFINITY), 3.75);
        assert_abs_diff_eq!(q.reduce(f32::NEG_INFINITY), -3.75);
    }

    #[test]
    fn test_qformat_parse_and_display() {
        let q: QFormat = "Q3.4".parse().unwrap();
        assert_eq!(q, QFormat::new(3, 4));
        assert_eq!(q.to_string(), "Q3.4");
        assert_eq!("q1.7".parse::<QFormat>().unwrap(), QFormat::new(1, 7));
        assert_eq!("2.5".parse::<QFormat>().unwrap(), QFormat::new(2, 5));
    }

    #[test]
    fn test_qformat_parse_rejects_garbage() {
        for bad in ["Q3", "Q-1.2", "Qa.b", "", "Q3.4.5"] {
            assert!(
                matches!(bad.parse::<QFormat>(), Err(Error::InvalidArgument(_))),
                "{bad} should not parse"
            );
        }
    }

    #[test]
    fn test_qformat_rejects_unrepresentable_widths() {
        for bad in ["Q2.130", "Q20.20", "Q0.32", "Q4294967295.1"] {
            assert!(
                matches!(bad.parse::<QFormat>(), Err(Error::InvalidArgument(_))),
                "{bad} should not parse"
            );
        }
        assert!(QFormat::try_new(16, 16).is_err());
        assert_eq!(QFormat::try_new(16, 15).unwrap(), QFormat::new(16, 15));
        assert!(serde_json::from_str::<QFormat>("\"Q2.130\"").is_err());
    }

    #[test]
    #[should_panic(expected = "exceeds 31 bits")]
    fn test_qformat_new_panics_past_word_width() {
        let _ = QFormat::new(2, 130);
    }

    #[test]
    fn test_max_value_rounds_toward_zero_past_f32_precision() {
        // 2^8 - 2^-20 needs 28 significant bits
        let q = QFormat::new(8, 20);
        let exact = 256.0 - 2f64.powi(-20);
        let max = q.max_value();
        assert!(f64::from(max) <= exact);
        assert_eq!(max, 256.0 - 2f32.powi(-16));

        let y = q.reduce(1000.0);
        assert!(f64::from(y) <= exact, "{y} above {exact}");
        assert_eq!(q.reduce(-1000.0), -max);
    }

    #[test]
    fn test_widest_formats_stay_finite() {
        for (m, f) in [(0, 31), (31, 0), (15, 16)] {
            let q = QFormat::new(m, f);
            let y = q.reduce(0.3);
            assert!(y.is_finite(), "Q{m}.{f} gave {y}");
            let exact = 2f64.powi(m as i32) - 2f64.powi(-(f as i32));
            assert!(f64::from(q.max_value()) <= exact);
        }
    }

    #[test]
    fn test_qformat_serde_as_string() {
        let q = QFormat::new(5, 10);
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, "\"Q5.10\"");
        let back: QFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, q);
    }

    #[test]
    fn test_clamped_relu_scalar() {
        assert_abs_diff_eq!(clamped_relu(0.05, 0.1, None), 0.0);
        assert_abs_diff_eq!(clamped_relu(0.1, 0.1, None), 0.1);
        assert_abs_diff_eq!(clamped_relu(5.0, 0.1, Some(2.0)), 2.0);
        assert_abs_diff_eq!(clamped_relu(-3.0, 0.1, Some(2.0)), 0.0);
    }

    #[test]
    fn test_clamped_relu_threshold_above_ceiling() {
        // Everything is capped below the threshold, so everything dies
        assert_abs_diff_eq!(clamped_relu(10.0, 3.0, Some(2.0)), 0.0);
    }

    #[test]
    fn test_binary_building_blocks() {
        assert_abs_diff_eq!(hard_sigmoid(-2.0), 0.0);
        assert_abs_diff_eq!(hard_sigmoid(0.0), 0.5);
        assert_abs_diff_eq!(hard_sigmoid(0.5), 0.75);
        assert_abs_diff_eq!(binary_sigmoid(0.0), 0.0);
        assert_abs_diff_eq!(binary_sigmoid(0.2), 1.0);
        assert_abs_diff_eq!(binary_tanh(-0.3), -1.0);
        assert_abs_diff_eq!(binary_tanh(0.0), 0.0);
        assert_abs_diff_eq!(binary_tanh(7.0), 1.0);
    }

    #[test]
    fn test_binarize_zero_weight_goes_negative() {
        // hard_sigmoid(0) = 0.5 rounds to 0
        assert_abs_diff_eq!(binarize(0.0, 1.0), -1.0);
        assert_abs_diff_eq!(binarize(0.01, 1.0), 1.0);
    }

    #[test]
    fn test_binarize_scaled() {
        assert_abs_diff_eq!(binarize(0.3, 0.5), 0.5);
        assert_abs_diff_eq!(binarize(-0.3, 0.5), -0.5);
    }

    #[test]
    fn test_binarize_h_zero_is_signed_zero() {
        for w in [-1.0f32, 0.0, 1.0] {
            let y = binarize(w, 0.0);
            assert_eq!(y, 0.0, "w={w} gave {y}");
        }
    }

    #[test]
    fn test_binarize_with_draw_extremes() {
        assert_abs_diff_eq!(binarize_with_draw(5.0, 1.0, 0.999), 1.0);
        assert_abs_diff_eq!(binarize_with_draw(-5.0, 1.0, 0.0), -1.0);
        assert_abs_diff_eq!(binarize_with_draw(0.0, 1.0, 0.49), 1.0);
        assert_abs_diff_eq!(binarize_with_draw(0.0, 1.0, 0.51), -1.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn prop_reduce_on_grid_and_bounded(
            x in -1000.0f32..1000.0,
            m in 0u32..16,
            f in 0u32..16,
        ) {
            let q = QFormat::new(m, f);
            let y = q.reduce(x);
            let max = q.max_value();
            let exact = 2f64.powi(m as i32) - 2f64.powi(-(f as i32));
            prop_assert!(y >= -max && y <= max, "{} outside ±{}", y, max);
            prop_assert!(f64::from(y.abs()) <= exact, "{} above Q{}.{} maximum", y, m, f);
            let k = y * q.scale();
            prop_assert!((k - k.round()).abs() < 1e-3, "{} not a multiple of {}", y, q.step());
        }

        #[test]
        fn prop_reduce_idempotent(
            x in -100.0f32..100.0,
            m in 0u32..16,
            f in 0u32..16,
        ) {
            let q = QFormat::new(m, f);
            let once = q.reduce(x);
            prop_assert_eq!(q.reduce(once), once);
        }

        #[test]
        fn prop_reduce_error_at_most_half_step_in_range(
            x in -3.0f32..3.0,
            f in 0u32..10,
        ) {
            let q = QFormat::new(2, f);
            let y = q.reduce(x);
            prop_assert!((y - x).abs() <= q.step() / 2.0 + 1e-6);
        }

        #[test]
        fn prop_binarize_two_levels(w in -50.0f32..50.0, h in 0.01f32..10.0) {
            let y = binarize(w, h);
            prop_assert!(y == h || y == -h);
        }

        #[test]
        fn prop_clamped_relu_bounds(
            x in -10.0f32..10.0,
            t in 0.0f32..2.0,
            cap in 0.5f32..6.0,
        ) {
            let y = clamped_relu(x, t, Some(cap));
            let r = relu(x, Some(cap));
            prop_assert!(y <= cap);
            if r < t {
                prop_assert_eq!(y, 0.0);
            } else {
                prop_assert_eq!(y, r);
            }
        }
    }
}

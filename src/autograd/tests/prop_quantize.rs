//! Property-based tests for the quantization ops

use super::test_utils::{analytical_grad, numerical_grad};
use crate::autograd::{binarize, clamped_relu, hard_sigmoid, reduce_precision, relu, Tensor};
use crate::quant::QFormat;
use proptest::prelude::*;

/// Keep samples away from the kinks where finite differences disagree
fn away_from(x: f32, kinks: &[f32], margin: f32) -> bool {
    kinks.iter().all(|k| (x - k).abs() > margin)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_relu_gradient_check(
        x in prop::collection::vec(-10.0f32..10.0, 2..20)
            .prop_filter("no samples near 0", |v| v.iter().all(|&x| away_from(x, &[0.0], 0.01)))
    ) {
        let analytical = analytical_grad(relu, &x);
        let numerical = numerical_grad(relu, &x, 1e-3);
        for i in 0..x.len() {
            let diff = (analytical[i] - numerical[i]).abs();
            prop_assert!(diff < 0.05, "Gradient mismatch at index {}: analytical={}, numerical={}",
                        i, analytical[i], numerical[i]);
        }
    }

    #[test]
    fn prop_clamped_relu_gradient_check(
        x in prop::collection::vec(-5.0f32..5.0, 2..20)
            .prop_filter("no samples near kinks", |v| {
                v.iter().all(|&x| away_from(x, &[0.0, 0.5, 3.0], 0.01))
            })
    ) {
        let op = |t: &Tensor| clamped_relu(t, 0.5, Some(3.0));
        let analytical = analytical_grad(op, &x);
        let numerical = numerical_grad(op, &x, 1e-3);
        for i in 0..x.len() {
            let diff = (analytical[i] - numerical[i]).abs();
            prop_assert!(diff < 0.05, "Gradient mismatch at index {}: analytical={}, numerical={}",
                        i, analytical[i], numerical[i]);
        }
    }

    #[test]
    fn prop_hard_sigmoid_gradient_check(
        x in prop::collection::vec(-3.0f32..3.0, 2..20)
            .prop_filter("no samples near kinks", |v| {
                v.iter().all(|&x| away_from(x, &[-1.0, 1.0], 0.01))
            })
    ) {
        let analytical = analytical_grad(hard_sigmoid, &x);
        let numerical = numerical_grad(hard_sigmoid, &x, 1e-3);
        for i in 0..x.len() {
            let diff = (analytical[i] - numerical[i]).abs();
            prop_assert!(diff < 0.05, "Gradient mismatch at index {}: analytical={}, numerical={}",
                        i, analytical[i], numerical[i]);
        }
    }

    #[test]
    fn prop_reduce_precision_ste_mask(
        x in prop::collection::vec(-20.0f32..20.0, 1..32),
        m in 0u32..5,
        f in 0u32..8,
    ) {
        let format = QFormat::new(m, f);
        let grad = analytical_grad(|t| reduce_precision(t, format), &x);
        for (i, &xi) in x.iter().enumerate() {
            let expected = if xi.abs() <= format.max_value() { 1.0 } else { 0.0 };
            prop_assert_eq!(grad[i], expected);
        }
    }

    #[test]
    fn prop_binarize_ste_bounded(
        x in prop::collection::vec(-5.0f32..5.0, 1..32),
        h in 0.1f32..4.0,
    ) {
        let grad = analytical_grad(|t| binarize(t, h), &x);
        for &g in &grad {
            prop_assert!(g == 0.0 || g == 1.0);
        }
    }
}

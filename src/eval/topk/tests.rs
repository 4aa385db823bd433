//! Tests for top-k metrics.

use super::*;
use crate::error::Error;
use approx::assert_abs_diff_eq;
use ndarray::array;
use proptest::prelude::*;

#[test]
fn test_in_top_k_basic() {
    let predictions = array![[0.1f32, 0.7, 0.2], [0.5, 0.3, 0.2], [0.2, 0.3, 0.5]];
    let hits = in_top_k(predictions.view(), &[1, 2, 0], 1).unwrap();
    assert_eq!(hits, vec![true, false, false]);

    let hits = in_top_k(predictions.view(), &[1, 2, 0], 2).unwrap();
    assert_eq!(hits, vec![true, false, false]);

    let hits = in_top_k(predictions.view(), &[1, 1, 0], 2).unwrap();
    assert_eq!(hits, vec![true, true, false]);
}

#[test]
fn test_in_top_k_zero_and_all() {
    let predictions = array![[0.1f32, 0.9], [0.6, 0.4]];
    assert_eq!(
        in_top_k(predictions.view(), &[1, 0], 0).unwrap(),
        vec![false, false]
    );
    assert_eq!(
        in_top_k(predictions.view(), &[0, 1], 5).unwrap(),
        vec![true, true]
    );
}

#[test]
fn test_in_top_k_ties_favor_higher_index() {
    let predictions = array![[0.5f32, 0.5, 0.5]];
    assert_eq!(in_top_k(predictions.view(), &[2], 1).unwrap(), vec![true]);
    assert_eq!(in_top_k(predictions.view(), &[0], 1).unwrap(), vec![false]);
}

#[test]
fn test_in_top_k_shape_mismatch() {
    let predictions = array![[0.1f32, 0.9]];
    let err = in_top_k(predictions.view(), &[0, 1], 1).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

#[test]
fn test_in_top_k_target_out_of_range() {
    let predictions = array![[0.1f32, 0.9]];
    let err = in_top_k(predictions.view(), &[2], 1).unwrap_err();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn test_top_k_accuracy() {
    let predictions = array![
        [0.1f32, 0.2, 0.3, 0.4],
        [0.4, 0.3, 0.2, 0.1],
        [0.25, 0.25, 0.4, 0.1],
        [0.0, 0.0, 0.1, 0.9],
    ];
    let targets = [3, 2, 2, 0];
    assert_abs_diff_eq!(top_k_accuracy(predictions.view(), &targets, 1).unwrap(), 0.5);
    assert_abs_diff_eq!(top_k_accuracy(predictions.view(), &targets, 3).unwrap(), 0.75);
}

#[test]
fn test_top_k_accuracy_empty_batch() {
    let predictions = ndarray::Array2::<f32>::zeros((0, 4));
    assert_eq!(top_k_accuracy(predictions.view(), &[], 1).unwrap(), 0.0);
}

#[test]
fn test_top_k_categorical_accuracy() {
    let y_true = array![[0.0f32, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let y_pred = array![[0.2f32, 0.3, 0.5], [0.1, 0.6, 0.3], [0.7, 0.2, 0.1]];
    assert_abs_diff_eq!(
        top_k_categorical_accuracy(y_true.view(), y_pred.view(), 1).unwrap(),
        1.0 / 3.0
    );
    assert_abs_diff_eq!(
        top_k_categorical_accuracy(y_true.view(), y_pred.view(), 2).unwrap(),
        2.0 / 3.0
    );
}

#[test]
fn test_top_k_categorical_shape_mismatch() {
    let y_true = array![[1.0f32, 0.0]];
    let y_pred = array![[0.5f32, 0.3, 0.2]];
    let err = top_k_categorical_accuracy(y_true.view(), y_pred.view(), 1).unwrap_err();
    assert!(matches!(err, Error::ShapeMismatch { .. }));
}

proptest! {
    #[test]
    fn prop_accuracy_monotone_in_k(
        rows in prop::collection::vec(prop::collection::vec(-5.0f32..5.0, 5), 1..20),
        seed_targets in prop::collection::vec(0usize..5, 20),
    ) {
        let batch = rows.len();
        let flat: Vec<f32> = rows.into_iter().flatten().collect();
        let predictions = ndarray::Array2::from_shape_vec((batch, 5), flat).unwrap();
        let targets = &seed_targets[..batch];

        let mut previous = 0.0;
        for k in 0..=5 {
            let acc = top_k_accuracy(predictions.view(), targets, k).unwrap();
            prop_assert!(acc >= previous);
            prop_assert!((0.0..=1.0).contains(&acc));
            previous = acc;
        }
        prop_assert_eq!(previous, 1.0);
    }
}

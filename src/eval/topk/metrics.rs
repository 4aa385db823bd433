//! Top-k membership and accuracy.

use crate::error::{Error, Result};
use ndarray::{ArrayView1, ArrayView2, Axis};

/// Whether each example's target class is among its `k` highest scores
///
/// `predictions` is `batch x classes`, `targets` holds one class index per
/// row. Scores are ranked with a stable ascending sort, so among equal
/// scores the higher class index ranks higher. `k == 0` never matches and
/// `k >= classes` always matches.
pub fn in_top_k(predictions: ArrayView2<'_, f32>, targets: &[usize], k: usize) -> Result<Vec<bool>> {
    let (batch, classes) = predictions.dim();
    if targets.len() != batch {
        return Err(Error::ShapeMismatch {
            expected: vec![batch],
            got: vec![targets.len()],
        });
    }
    if let Some(&bad) = targets.iter().find(|&&t| t >= classes) {
        return Err(Error::InvalidArgument(format!(
            "target class {bad} out of range for {classes} classes"
        )));
    }

    let hits = predictions
        .axis_iter(Axis(0))
        .zip(targets)
        .map(|(row, &target)| top_k_indices(row, k).contains(&target))
        .collect();

    Ok(hits)
}

/// Fraction of examples whose target class is in the top `k`
///
/// An empty batch scores `0.0`.
pub fn top_k_accuracy(predictions: ArrayView2<'_, f32>, targets: &[usize], k: usize) -> Result<f64> {
    let hits = in_top_k(predictions, targets, k)?;
    if hits.is_empty() {
        return Ok(0.0);
    }
    let correct = hits.iter().filter(|&&hit| hit).count();
    Ok(correct as f64 / hits.len() as f64)
}

/// Top-k accuracy with one-hot (or score-like) ground truth
///
/// Targets are the argmax of each `y_true` row; the first maximum wins.
pub fn top_k_categorical_accuracy(
    y_true: ArrayView2<'_, f32>,
    y_pred: ArrayView2<'_, f32>,
    k: usize,
) -> Result<f64> {
    if y_true.dim() != y_pred.dim() {
        let (tr, tc) = y_true.dim();
        let (pr, pc) = y_pred.dim();
        return Err(Error::ShapeMismatch {
            expected: vec![tr, tc],
            got: vec![pr, pc],
        });
    }

    let targets: Vec<usize> = y_true.axis_iter(Axis(0)).map(argmax).collect();
    top_k_accuracy(y_pred, &targets, k)
}

fn top_k_indices(row: ArrayView1<'_, f32>, k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..row.len()).collect();
    order.sort_by(|&a, &b| row[a].total_cmp(&row[b]));
    let skip = order.len().saturating_sub(k);
    order.split_off(skip)
}

fn argmax(row: ArrayView1<'_, f32>) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best_i, best_v), (i, &v)| {
            if v > best_v {
                (i, v)
            } else {
                (best_i, best_v)
            }
        })
        .0
}

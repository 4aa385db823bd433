//! Elementwise op scaffolding: forward map plus a local-derivative mask

use crate::autograd::tensor::GradCell;
use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::rc::Rc;

/// Apply `forward` to every element and record `derivative` for backward
///
/// `derivative` receives the input element and returns ∂out/∂in. For the
/// quantizers this is a straight-through mask rather than the true
/// (almost-everywhere zero) derivative.
pub(crate) fn unary_op<F, D>(a: &Tensor, forward: F, derivative: D) -> Tensor
where
    F: Fn(f32) -> f32,
    D: Fn(f32) -> f32,
{
    unary_op_with_data(a, a.data().mapv(forward), derivative)
}

/// Forward values computed by the caller, e.g. from a random draw
pub(crate) fn unary_op_with_data<D>(a: &Tensor, data: Array1<f32>, derivative: D) -> Tensor
where
    D: Fn(f32) -> f32,
{
    debug_assert_eq!(data.len(), a.len());
    let requires_grad = a.requires_grad();

    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(MaskedBackward {
            a: a.clone(),
            local_grad: a.data().mapv(derivative),
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct MaskedBackward {
    a: Tensor,
    local_grad: Array1<f32>,
    result_grad: GradCell,
}

impl BackwardOp for MaskedBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.a.requires_grad() {
                // ∂L/∂a = ∂L/∂out * ∂out/∂a
                self.a.accumulate_grad(grad * &self.local_grad);
            }
        }
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

//! Basic autograd operations: add, mul, scale, sum

use super::elementwise::unary_op;
use crate::autograd::tensor::GradCell;
use crate::autograd::{BackwardOp, Tensor};
use ndarray::Array1;
use std::rc::Rc;

/// Add two tensors element-wise
///
/// # Panics
///
/// Panics if the tensors differ in length.
pub fn add(a: &Tensor, b: &Tensor) -> Tensor {
    binary_op(a, b, a.data() + b.data(), BinaryKind::Add)
}

/// Multiply two tensors element-wise
///
/// # Panics
///
/// Panics if the tensors differ in length.
pub fn mul(a: &Tensor, b: &Tensor) -> Tensor {
    binary_op(a, b, a.data() * b.data(), BinaryKind::Mul)
}

/// Scale tensor by a scalar
pub fn scale(a: &Tensor, factor: f32) -> Tensor {
    unary_op(a, |x| x * factor, |_| factor)
}

/// Sum all elements into a one-element tensor
pub fn sum(a: &Tensor) -> Tensor {
    let requires_grad = a.requires_grad();
    let mut result = Tensor::new(Array1::from(vec![a.data().sum()]), requires_grad);

    if requires_grad {
        let backward_op = Rc::new(SumBackward {
            a: a.clone(),
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

#[derive(Clone, Copy)]
enum BinaryKind {
    Add,
    Mul,
}

fn binary_op(a: &Tensor, b: &Tensor, data: Array1<f32>, kind: BinaryKind) -> Tensor {
    let requires_grad = a.requires_grad() || b.requires_grad();
    let mut result = Tensor::new(data, requires_grad);

    if requires_grad {
        let backward_op = Rc::new(BinaryBackward {
            a: a.clone(),
            b: b.clone(),
            kind,
            result_grad: result.grad_cell(),
        });
        result.set_backward_op(backward_op);
    }

    result
}

struct BinaryBackward {
    a: Tensor,
    b: Tensor,
    kind: BinaryKind,
    result_grad: GradCell,
}

impl BackwardOp for BinaryBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            match self.kind {
                BinaryKind::Add => {
                    if self.a.requires_grad() {
                        self.a.accumulate_grad(grad.clone());
                    }
                    if self.b.requires_grad() {
                        self.b.accumulate_grad(grad.clone());
                    }
                }
                BinaryKind::Mul => {
                    // ∂L/∂a = ∂L/∂out * b, ∂L/∂b = ∂L/∂out * a
                    if self.a.requires_grad() {
                        self.a.accumulate_grad(grad * self.b.data());
                    }
                    if self.b.requires_grad() {
                        self.b.accumulate_grad(grad * self.a.data());
                    }
                }
            }
        }
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }
}

struct SumBackward {
    a: Tensor,
    result_grad: GradCell,
}

impl BackwardOp for SumBackward {
    fn backward(&self) {
        if let Some(grad) = self.result_grad.borrow().as_ref() {
            if self.a.requires_grad() {
                // Broadcast the scalar gradient
                self.a
                    .accumulate_grad(Array1::from_elem(self.a.len(), grad[0]));
            }
        }
    }

    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }
}

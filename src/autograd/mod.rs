//! Tape-based autograd engine
//!
//! The computation-graph backend of the quantizer. Each op records a
//! backward closure over its inputs; calling [`backward`] on an output walks
//! the recorded graph in topological order and accumulates gradients into
//! every input that requires them.
//!
//! ```
//! use snnkit::autograd::{backward, quantized_relu, Tensor};
//! use snnkit::QFormat;
//!
//! let x = Tensor::from_vec(vec![-0.4, 0.26, 9.0], true);
//! let mut y = quantized_relu(&x, QFormat::new(2, 2));
//! assert_eq!(y.data().to_vec(), vec![0.0, 0.25, 3.75]);
//!
//! backward(&mut y, None);
//! let grad = x.grad().expect("gradient recorded");
//! assert_eq!(grad.to_vec(), vec![0.0, 1.0, 0.0]);
//! ```

mod backward;
mod ops;
mod tensor;

#[cfg(test)]
mod tests;

pub use backward::BackwardOp;
pub use ops::*;
pub use tensor::Tensor;

/// Perform backward pass on a tensor
pub fn backward(tensor: &mut Tensor, grad_output: Option<ndarray::Array1<f32>>) {
    if let Some(grad) = grad_output {
        tensor.set_grad(grad);
    } else {
        let ones = ndarray::Array1::ones(tensor.data().len());
        tensor.set_grad(ones);
    }

    if let Some(op) = tensor.backward_op() {
        backward::run_backward(op);
    }
}

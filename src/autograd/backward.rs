//! Backward operation trait and graph traversal

use super::Tensor;
use std::collections::HashMap;
use std::rc::Rc;

/// A recorded operation that propagates its output gradient to its inputs
///
/// `backward` reads the gradient accumulated on the op's output and pushes
/// the input gradients. It does not recurse; [`run_backward`] schedules the
/// inputs' own ops once every consumer has contributed.
pub trait BackwardOp {
    fn backward(&self);

    /// Tensors this op was recorded over, repeated once per use
    fn inputs(&self) -> Vec<Tensor>;
}

type OpId = *const ();

fn op_id(op: &Rc<dyn BackwardOp>) -> OpId {
    Rc::as_ptr(op) as *const ()
}

/// Run every op reachable from `root` exactly once, consumers first
///
/// Kahn's algorithm over the op graph: an op becomes ready when every edge
/// from an op that consumes its output has been processed, so a node used
/// twice sees its full gradient before it propagates.
pub(crate) fn run_backward(root: Rc<dyn BackwardOp>) {
    let (in_degree, ops) = build_graph_maps(&root);
    let mut in_degree = in_degree;

    let mut ready = vec![root];
    while let Some(op) = ready.pop() {
        op.backward();
        for input in op.inputs() {
            let Some(input_op) = input.backward_op() else {
                continue;
            };
            let id = op_id(&input_op);
            let Some(deg) = in_degree.get_mut(&id) else {
                continue;
            };
            *deg -= 1;
            if *deg == 0 {
                if let Some(next) = ops.get(&id) {
                    ready.push(Rc::clone(next));
                }
            }
        }
    }
}

/// Count consumer edges per op and index every op reachable from `root`
fn build_graph_maps(
    root: &Rc<dyn BackwardOp>,
) -> (HashMap<OpId, usize>, HashMap<OpId, Rc<dyn BackwardOp>>) {
    let mut in_degree: HashMap<OpId, usize> = HashMap::new();
    let mut ops: HashMap<OpId, Rc<dyn BackwardOp>> = HashMap::new();

    ops.insert(op_id(root), Rc::clone(root));
    in_degree.insert(op_id(root), 0);
    let mut stack = vec![Rc::clone(root)];

    while let Some(op) = stack.pop() {
        for input in op.inputs() {
            let Some(input_op) = input.backward_op() else {
                continue;
            };
            let id = op_id(&input_op);
            *in_degree.entry(id).or_insert(0) += 1;
            if !ops.contains_key(&id) {
                ops.insert(id, Rc::clone(&input_op));
                stack.push(input_op);
            }
        }
    }

    (in_degree, ops)
}

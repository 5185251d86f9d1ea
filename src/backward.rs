//! Reverse-mode automatic differentiation driver.
//!
//! The backward pass computes gradients by:
//! 1. Building a topological ordering of the nodes reachable from the root
//! 2. Sweeping that ordering in reverse, accumulating adjoints root-to-leaves
//! 3. Folding the pass's adjoints into each node's persistent `grad` field

use log::trace;

use crate::node::{Graph, Node, NodeId};
use crate::ops;

impl Graph {
    /// Compute d(root)/d(node) for every node reachable from `root` and add
    /// it into that node's gradient accumulator.
    ///
    /// Gradients accumulate across calls: a second pass over the same root
    /// without an intervening [`zero_grad`](Graph::zero_grad) adds the same
    /// contributions again (doubling them), which is the behavior wanted for
    /// mini-batch style accumulation. Nodes unreachable from `root` are left
    /// untouched.
    pub fn backward(&self, root: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        let order = topo_order(&nodes, root);
        trace!(
            "backward sweep over {} of {} nodes",
            order.len(),
            nodes.len()
        );

        // Adjoints for this pass live in their own buffer; d(root)/d(root) = 1.
        let mut adjoints = vec![0.0; nodes.len()];
        adjoints[root.0] = 1.0;

        // Reverse topological order guarantees a node's adjoint is complete
        // (every consumer has already run) before the node propagates it.
        for &id in order.iter().rev() {
            let g = adjoints[id.0];
            if g == 0.0 {
                continue;
            }
            let node = nodes[id.0];
            ops::accumulate(node.op, node.value, g, &nodes, &mut adjoints);
        }

        for &id in &order {
            nodes[id.0].grad += adjoints[id.0];
        }
    }
}

/// Topological ordering of the nodes reachable from `root`, operands first.
///
/// Postorder DFS with an explicit frame stack, so chain depth is limited by
/// heap, not the call stack. Visited tracking is a boolean array indexed by
/// arena position; two distinct nodes sharing a numeric value are still
/// distinct here.
pub(crate) fn topo_order(nodes: &[Node], root: NodeId) -> Vec<NodeId> {
    let mut visited = vec![false; nodes.len()];
    let mut order = Vec::new();
    // (node, index of the next operand to descend into)
    let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
    visited[root.0] = true;

    while let Some(frame) = stack.last_mut() {
        let (id, cursor) = *frame;
        match nodes[id.0].op.operand(cursor) {
            Some(child) => {
                frame.1 += 1;
                if !visited[child.0] {
                    visited[child.0] = true;
                    stack.push((child, 0));
                }
            }
            None => {
                order.push(id);
                stack.pop();
            }
        }
    }

    order
}

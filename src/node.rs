//! Core data structures for the computation graph.
//!
//! All nodes of one graph live in a single growable arena owned by [`Graph`];
//! operand references are plain [`NodeId`] indices into that arena. Indices
//! are trivially copyable and the graph is acyclic by construction, since an
//! operation can only reference nodes that already exist when it is recorded.

use std::cell::RefCell;

use crate::error::GraphError;
use crate::scalar::Scalar;

/// Index of a node in its graph's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Position of this node in the arena.
    pub fn index(self) -> usize {
        self.0
    }
}

/// The operation that produced a node, together with its operand indices.
///
/// `Leaf` covers both user inputs and constants promoted from raw scalars;
/// neither participates in gradient propagation. The exponent of `Pow` is a
/// host constant recorded at construction time, not a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Op {
    /// Input value or promoted constant (no operands).
    Leaf,
    /// operands\[0\] + operands\[1\]
    Add(NodeId, NodeId),
    /// operands\[0\] * operands\[1\]
    Mul(NodeId, NodeId),
    /// operands\[0\] ^ exponent, for a fixed finite exponent
    Pow(NodeId, f64),
    /// max(0, operands\[0\])
    Relu(NodeId),
}

impl Op {
    /// The `i`-th operand of this operation, if any.
    ///
    /// A binary op may legitimately list the same node twice (e.g. `x * x`);
    /// traversal dedups by index while the gradient rule still contributes
    /// once per listed operand.
    pub(crate) fn operand(self, i: usize) -> Option<NodeId> {
        match (self, i) {
            (Op::Add(a, _), 0) | (Op::Mul(a, _), 0) | (Op::Pow(a, _), 0) | (Op::Relu(a), 0) => {
                Some(a)
            }
            (Op::Add(_, b), 1) | (Op::Mul(_, b), 1) => Some(b),
            _ => None,
        }
    }

    /// Short printable tag for debugging output.
    pub fn symbol(self) -> &'static str {
        match self {
            Op::Leaf => "",
            Op::Add(..) => "+",
            Op::Mul(..) => "*",
            Op::Pow(..) => "**",
            Op::Relu(..) => "relu",
        }
    }
}

/// A single arena slot: forward value, gradient accumulator, producing op.
///
/// `value` and `op` are immutable once recorded; `grad` starts at zero and is
/// only ever touched by [`Graph::backward`] and [`Graph::zero_grad`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) value: f64,
    pub(crate) grad: f64,
    pub(crate) op: Op,
}

/// Either an existing node or a raw scalar awaiting promotion.
///
/// Operation constructors accept `impl Into<Operand>` so that a raw `f64` can
/// stand in for a node on either side of a binary op; it is promoted to a
/// constant leaf before the operation is recorded.
#[derive(Debug, Clone, Copy)]
pub enum Operand {
    /// An already-recorded node.
    Node(NodeId),
    /// A raw scalar, promoted to a constant leaf on use.
    Value(f64),
}

impl From<NodeId> for Operand {
    fn from(id: NodeId) -> Self {
        Operand::Node(id)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Value(value)
    }
}

impl<'g> From<Scalar<'g>> for Operand {
    fn from(s: Scalar<'g>) -> Self {
        Operand::Node(s.id())
    }
}

/// Arena for one computation graph.
///
/// Recording an operation appends exactly one node (plus any constant leaves
/// promoted for raw-scalar operands) and never mutates existing nodes.
/// Interior mutability keeps the recording API at `&self`; the graph is
/// single-threaded and not `Sync`.
#[derive(Debug, Default)]
pub struct Graph {
    pub(crate) nodes: RefCell<Vec<Node>>,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Graph {
            nodes: RefCell::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of nodes recorded so far.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Whether the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn push(&self, value: f64, op: Op) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(Node {
            value,
            grad: 0.0,
            op,
        });
        id
    }

    /// Record a leaf node holding a raw input value.
    pub fn leaf(&self, value: f64) -> NodeId {
        self.push(value, Op::Leaf)
    }

    /// Resolve an operand, promoting a raw scalar to a constant leaf.
    fn resolve(&self, operand: impl Into<Operand>) -> NodeId {
        match operand.into() {
            Operand::Node(id) => id,
            Operand::Value(v) => self.leaf(v),
        }
    }

    // === Primitive operations ===

    /// Record `a + b`.
    pub fn add(&self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let (a, b) = (self.resolve(a), self.resolve(b));
        self.push(self.value(a) + self.value(b), Op::Add(a, b))
    }

    /// Record `a * b`.
    pub fn mul(&self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let (a, b) = (self.resolve(a), self.resolve(b));
        self.push(self.value(a) * self.value(b), Op::Mul(a, b))
    }

    /// Record `a ^ exponent` for a fixed numeric exponent.
    ///
    /// The exponent is part of the graph structure, not a differentiable
    /// node; a NaN or infinite exponent is a contract violation and fails
    /// here, at construction time, never during the backward pass.
    pub fn pow(&self, a: impl Into<Operand>, exponent: f64) -> Result<NodeId, GraphError> {
        if !exponent.is_finite() {
            return Err(GraphError::InvalidExponent(exponent));
        }
        Ok(self.pow_raw(self.resolve(a), exponent))
    }

    /// `pow` without the exponent check, for internal fixed exponents.
    fn pow_raw(&self, a: NodeId, exponent: f64) -> NodeId {
        self.push(self.value(a).powf(exponent), Op::Pow(a, exponent))
    }

    /// Record `max(0, a)`.
    pub fn relu(&self, a: impl Into<Operand>) -> NodeId {
        let a = self.resolve(a);
        self.push(self.value(a).max(0.0), Op::Relu(a))
    }

    // === Derived operations, expressed through the primitives ===

    /// Record `-a`, as `a * -1`.
    pub fn neg(&self, a: impl Into<Operand>) -> NodeId {
        let a = self.resolve(a);
        self.mul(a, -1.0)
    }

    /// Record `a - b`, as `a + (-b)`.
    pub fn sub(&self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let (a, b) = (self.resolve(a), self.resolve(b));
        let neg_b = self.neg(b);
        self.add(a, neg_b)
    }

    /// Record `a / b`, as `a * b^-1`.
    pub fn div(&self, a: impl Into<Operand>, b: impl Into<Operand>) -> NodeId {
        let (a, b) = (self.resolve(a), self.resolve(b));
        let inv_b = self.pow_raw(b, -1.0);
        self.mul(a, inv_b)
    }

    // === Accessors ===

    /// Forward value of a node.
    pub fn value(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.0].value
    }

    /// Accumulated gradient of a node.
    pub fn grad(&self, id: NodeId) -> f64 {
        self.nodes.borrow()[id.0].grad
    }

    /// The operation that produced a node.
    pub fn op(&self, id: NodeId) -> Op {
        self.nodes.borrow()[id.0].op
    }

    /// Reset every node's gradient accumulator to zero.
    ///
    /// Backward passes accumulate into `grad` rather than overwriting it, so
    /// callers wanting a fresh gradient computation call this first.
    pub fn zero_grad(&self) {
        for node in self.nodes.borrow_mut().iter_mut() {
            node.grad = 0.0;
        }
    }

    /// Record a leaf and return it wrapped in the operator-overload handle.
    pub fn scalar(&self, value: f64) -> Scalar<'_> {
        self.handle(self.leaf(value))
    }

    /// Wrap an existing node in the operator-overload handle.
    pub fn handle(&self, id: NodeId) -> Scalar<'_> {
        Scalar::new(self, id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_starts_with_zero_grad() {
        let g = Graph::new();
        let x = g.leaf(3.5);
        assert_eq!(g.value(x), 3.5);
        assert_eq!(g.grad(x), 0.0);
        assert_eq!(g.op(x), Op::Leaf);
    }

    #[test]
    fn raw_scalar_promotes_to_constant_leaf() {
        let g = Graph::new();
        let x = g.leaf(2.0);
        let y = g.add(x, 3.0);
        // promotion appended one leaf before the add node
        assert_eq!(g.len(), 3);
        assert_eq!(g.value(y), 5.0);
        let promoted = g.op(y).operand(1).unwrap();
        assert_eq!(g.op(promoted), Op::Leaf);
        assert_eq!(g.value(promoted), 3.0);
    }

    #[test]
    fn operations_never_mutate_their_operands() {
        let g = Graph::new();
        let x = g.leaf(2.0);
        let y = g.leaf(3.0);
        g.mul(x, y);
        g.add(x, y);
        assert_eq!(g.value(x), 2.0);
        assert_eq!(g.value(y), 3.0);
        assert_eq!(g.grad(x), 0.0);
        assert_eq!(g.op(x), Op::Leaf);
    }

    #[test]
    fn pow_rejects_non_finite_exponent() {
        let g = Graph::new();
        let x = g.leaf(2.0);
        assert!(matches!(
            g.pow(x, f64::NAN),
            Err(GraphError::InvalidExponent(e)) if e.is_nan()
        ));
        assert!(matches!(
            g.pow(x, f64::INFINITY),
            Err(GraphError::InvalidExponent(_))
        ));
        // the failed construction recorded nothing
        assert_eq!(g.len(), 1);
    }

    #[test]
    fn derived_ops_build_on_primitives() {
        let g = Graph::new();
        let x = g.leaf(6.0);
        let y = g.leaf(2.0);

        let n = g.neg(x);
        assert_eq!(g.value(n), -6.0);
        assert!(matches!(g.op(n), Op::Mul(..)));

        let s = g.sub(x, y);
        assert_eq!(g.value(s), 4.0);
        assert!(matches!(g.op(s), Op::Add(..)));

        let d = g.div(x, y);
        assert_eq!(g.value(d), 3.0);
        assert!(matches!(g.op(d), Op::Mul(..)));
    }

    #[test]
    fn op_symbols_are_printable() {
        let g = Graph::new();
        let x = g.leaf(1.0);
        assert_eq!(g.op(x).symbol(), "");
        assert_eq!(g.op(g.add(x, x)).symbol(), "+");
        assert_eq!(g.op(g.mul(x, x)).symbol(), "*");
        assert_eq!(g.op(g.pow(x, 2.0).unwrap()).symbol(), "**");
        assert_eq!(g.op(g.relu(x)).symbol(), "relu");
    }
}

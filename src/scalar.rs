//! Operator-overload sugar over the [`Graph`] constructors.
//!
//! [`Scalar`] is a copyable handle pairing a node index with a borrow of its
//! graph, so expressions read like plain arithmetic (`2.0 * x + 2.0 + x`)
//! while every operator remains a thin wrapper over the explicit constructor
//! methods on [`Graph`]. Raw `f64` operands work on either side of a binary
//! operator and are promoted to constant leaves.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::GraphError;
use crate::node::{Graph, NodeId, Op};

/// Copyable handle to one node of a [`Graph`].
#[derive(Clone, Copy)]
pub struct Scalar<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Scalar<'g> {
    pub(crate) fn new(graph: &'g Graph, id: NodeId) -> Self {
        Scalar { graph, id }
    }

    /// Index of the underlying node.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// Forward value of the underlying node.
    pub fn value(self) -> f64 {
        self.graph.value(self.id)
    }

    /// Accumulated gradient of the underlying node.
    pub fn grad(self) -> f64 {
        self.graph.grad(self.id)
    }

    /// The operation that produced the underlying node.
    pub fn op(self) -> Op {
        self.graph.op(self.id)
    }

    /// `max(0, self)`.
    pub fn relu(self) -> Scalar<'g> {
        self.graph.handle(self.graph.relu(self.id))
    }

    /// `self ^ exponent` for a fixed finite exponent.
    pub fn powf(self, exponent: f64) -> Result<Scalar<'g>, GraphError> {
        Ok(self.graph.handle(self.graph.pow(self.id, exponent)?))
    }

    /// Run the backward pass with this node as the root.
    pub fn backward(self) {
        self.graph.backward(self.id);
    }

    fn same_graph(self, rhs: Scalar<'g>) -> Scalar<'g> {
        debug_assert!(
            std::ptr::eq(self.graph, rhs.graph),
            "operands belong to different graphs"
        );
        rhs
    }
}

impl fmt::Debug for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scalar")
            .field("id", &self.id.index())
            .field("value", &self.value())
            .field("grad", &self.grad())
            .field("op", &self.op().symbol())
            .finish()
    }
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(value={}, grad={})", self.value(), self.grad())
    }
}

// === Operator overloads: Scalar ⊕ Scalar, Scalar ⊕ f64, f64 ⊕ Scalar ===

impl<'g> Add for Scalar<'g> {
    type Output = Scalar<'g>;

    fn add(self, rhs: Scalar<'g>) -> Scalar<'g> {
        let rhs = self.same_graph(rhs);
        self.graph.handle(self.graph.add(self.id, rhs.id))
    }
}

impl<'g> Add<f64> for Scalar<'g> {
    type Output = Scalar<'g>;

    fn add(self, rhs: f64) -> Scalar<'g> {
        self.graph.handle(self.graph.add(self.id, rhs))
    }
}

impl<'g> Add<Scalar<'g>> for f64 {
    type Output = Scalar<'g>;

    fn add(self, rhs: Scalar<'g>) -> Scalar<'g> {
        rhs.graph.handle(rhs.graph.add(self, rhs.id))
    }
}

impl<'g> Sub for Scalar<'g> {
    type Output = Scalar<'g>;

    fn sub(self, rhs: Scalar<'g>) -> Scalar<'g> {
        let rhs = self.same_graph(rhs);
        self.graph.handle(self.graph.sub(self.id, rhs.id))
    }
}

impl<'g> Sub<f64> for Scalar<'g> {
    type Output = Scalar<'g>;

    fn sub(self, rhs: f64) -> Scalar<'g> {
        self.graph.handle(self.graph.sub(self.id, rhs))
    }
}

impl<'g> Sub<Scalar<'g>> for f64 {
    type Output = Scalar<'g>;

    fn sub(self, rhs: Scalar<'g>) -> Scalar<'g> {
        rhs.graph.handle(rhs.graph.sub(self, rhs.id))
    }
}

impl<'g> Mul for Scalar<'g> {
    type Output = Scalar<'g>;

    fn mul(self, rhs: Scalar<'g>) -> Scalar<'g> {
        let rhs = self.same_graph(rhs);
        self.graph.handle(self.graph.mul(self.id, rhs.id))
    }
}

impl<'g> Mul<f64> for Scalar<'g> {
    type Output = Scalar<'g>;

    fn mul(self, rhs: f64) -> Scalar<'g> {
        self.graph.handle(self.graph.mul(self.id, rhs))
    }
}

impl<'g> Mul<Scalar<'g>> for f64 {
    type Output = Scalar<'g>;

    fn mul(self, rhs: Scalar<'g>) -> Scalar<'g> {
        rhs.graph.handle(rhs.graph.mul(self, rhs.id))
    }
}

impl<'g> Div for Scalar<'g> {
    type Output = Scalar<'g>;

    fn div(self, rhs: Scalar<'g>) -> Scalar<'g> {
        let rhs = self.same_graph(rhs);
        self.graph.handle(self.graph.div(self.id, rhs.id))
    }
}

impl<'g> Div<f64> for Scalar<'g> {
    type Output = Scalar<'g>;

    fn div(self, rhs: f64) -> Scalar<'g> {
        self.graph.handle(self.graph.div(self.id, rhs))
    }
}

impl<'g> Div<Scalar<'g>> for f64 {
    type Output = Scalar<'g>;

    fn div(self, rhs: Scalar<'g>) -> Scalar<'g> {
        rhs.graph.handle(rhs.graph.div(self, rhs.id))
    }
}

impl<'g> Neg for Scalar<'g> {
    type Output = Scalar<'g>;

    fn neg(self) -> Scalar<'g> {
        self.graph.handle(self.graph.neg(self.id))
    }
}

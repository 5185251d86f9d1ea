//! Local gradient rules for each operation.
//!
//! A single dispatch keyed on the op tag implements every rule; there are no
//! per-node closures. Each rule adds its chain-rule contribution into the
//! adjoint slot of each operand, given the consuming node's own adjoint.

use crate::node::{Node, Op};

/// Propagate one node's adjoint `g` into its operands' adjoint slots.
///
/// `out_value` is the node's own forward value; the ReLU rule is gated on it
/// (gradient flows only where the rectifier was active). A binary op that
/// lists the same operand twice contributes twice, which is exactly the sum
/// the multivariate chain rule requires.
pub(crate) fn accumulate(op: Op, out_value: f64, g: f64, nodes: &[Node], adjoints: &mut [f64]) {
    match op {
        Op::Leaf => {}

        Op::Add(a, b) => {
            // z = a + b: dz/da = 1, dz/db = 1
            adjoints[a.0] += g;
            adjoints[b.0] += g;
        }

        Op::Mul(a, b) => {
            // z = a * b: dz/da = b, dz/db = a
            let (a_val, b_val) = (nodes[a.0].value, nodes[b.0].value);
            adjoints[a.0] += b_val * g;
            adjoints[b.0] += a_val * g;
        }

        Op::Pow(a, exponent) => {
            // z = a^k for constant k: dz/da = k * a^(k-1)
            let a_val = nodes[a.0].value;
            adjoints[a.0] += exponent * a_val.powf(exponent - 1.0) * g;
        }

        Op::Relu(a) => {
            // z = max(0, a): dz/da = 1 where z > 0, else 0
            if out_value > 0.0 {
                adjoints[a.0] += g;
            }
        }
    }
}

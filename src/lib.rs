//! # scalargrad - Reverse-mode Automatic Differentiation over Scalars
//!
//! A minimal reverse-mode autodiff engine for scalar-valued expressions.
//! Operations recorded on a [`Graph`] form an implicit computation DAG during
//! the forward pass; a single backward sweep then computes the gradient of
//! one output with respect to every node that contributed to it.
//!
//! ## Quick Start
//!
//! ```
//! use scalargrad::Graph;
//!
//! let g = Graph::new();
//! let x = g.scalar(2.0);
//! let y = g.scalar(3.0);
//!
//! // Build an expression: z = x * y + relu(x)
//! let z = x * y + x.relu();
//! assert!((z.value() - 8.0).abs() < 1e-12);
//!
//! // One backward pass fills in every gradient
//! z.backward();
//! assert!((x.grad() - 4.0).abs() < 1e-12); // dz/dx = y + 1
//! assert!((y.grad() - 2.0).abs() < 1e-12); // dz/dy = x
//! ```
//!
//! ## Supported Operations
//!
//! | Category | Operations |
//! |----------|------------|
//! | Primitive | `+`, `*`, [`Scalar::powf`] (x^k for constant k), [`Scalar::relu`] |
//! | Derived | unary `-` (via `*`), `-` (via `+`/neg), `/` (via `*`/pow) |
//!
//! Raw `f64` operands are accepted on either side of a binary operator and
//! promoted to constant leaves, so `2.0 * x + 2.0` records the same graph
//! shape as the spelled-out constructor calls.
//!
//! ## Architecture
//!
//! - **[`Graph`]**: arena owning every node of one expression; operation
//!   constructors (`add`, `mul`, `pow`, `relu`, and the derived `neg`, `sub`,
//!   `div`) are the primary API and append exactly one node each.
//! - **[`Scalar`]**: copyable operator-overload handle, a thin wrapper over
//!   those constructors.
//! - **[`Graph::backward`]**: postorder-DFS topological sort plus reverse
//!   sweep; local gradient rules are dispatched on the [`Op`] tag.
//! - **[`numeric_grad`]**: finite-difference reference for validating
//!   gradients in tests.
//!
//! ## Gradient accumulation
//!
//! `backward` adds into each node's gradient accumulator instead of
//! overwriting it. Calling it twice without [`Graph::zero_grad`] in between
//! therefore doubles every gradient; this is deliberate (it supports
//! mini-batch style accumulation) and callers wanting a fresh computation
//! reset first:
//!
//! ```
//! use scalargrad::Graph;
//!
//! let g = Graph::new();
//! let x = g.scalar(3.0);
//! let y = x * x;
//!
//! y.backward();
//! assert_eq!(x.grad(), 6.0);
//! y.backward();
//! assert_eq!(x.grad(), 12.0); // accumulated
//!
//! g.zero_grad();
//! y.backward();
//! assert_eq!(x.grad(), 6.0); // fresh
//! ```

mod backward;
mod check;
mod error;
mod node;
mod ops;
mod scalar;

pub use check::{max_abs_error, numeric_grad};
pub use error::GraphError;
pub use node::{Graph, NodeId, Op, Operand};
pub use scalar::Scalar;

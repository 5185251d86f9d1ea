//! Errors produced while recording operations on a [`Graph`](crate::Graph).
//!
//! All construction-time contract violations surface here immediately; the
//! backward pass itself never fails.

use thiserror::Error;

/// Errors raised while building a computation graph.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GraphError {
    /// `pow` was given an exponent that is not a fixed finite constant.
    ///
    /// The exponent of a power node is a plain host scalar baked into the
    /// graph, not a differentiable node, so NaN or infinite exponents are
    /// rejected up front rather than silently producing garbage gradients.
    #[error("pow exponent must be a finite numeric constant, got {0}")]
    InvalidExponent(f64),
}

//! Numerical gradient checking.
//!
//! Central finite differences give an engine-independent reference to verify
//! autodiff gradients against in tests.

/// Estimate the gradient of `f` at `point` by central finite differences.
///
/// Returns one partial derivative per coordinate, each computed as
/// `(f(x + eps e_i) - f(x - eps e_i)) / (2 eps)`. An `eps` around `1e-6` to
/// `1e-7` balances truncation against round-off for well-scaled inputs.
///
/// ```
/// use scalargrad::numeric_grad;
///
/// // f(x, y) = x^2 + y^2, so df/dx = 2x and df/dy = 2y
/// let grads = numeric_grad(|v| v[0] * v[0] + v[1] * v[1], &[3.0, 4.0], 1e-6);
/// assert!((grads[0] - 6.0).abs() < 1e-5);
/// assert!((grads[1] - 8.0).abs() < 1e-5);
/// ```
pub fn numeric_grad<F>(f: F, point: &[f64], eps: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    (0..point.len())
        .map(|i| {
            let mut hi = point.to_vec();
            let mut lo = point.to_vec();
            hi[i] += eps;
            lo[i] -= eps;
            (f(&hi) - f(&lo)) / (2.0 * eps)
        })
        .collect()
}

/// Largest absolute componentwise difference between two gradient vectors.
pub fn max_abs_error(a: &[f64], b: &[f64]) -> f64 {
    assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_grad_on_quadratic() {
        // f(x, y) = x^2 + 2xy + y^2: both partials are 2x + 2y
        let f = |v: &[f64]| v[0] * v[0] + 2.0 * v[0] * v[1] + v[1] * v[1];
        let grads = numeric_grad(f, &[1.0, 2.0], 1e-6);

        assert!((grads[0] - 6.0).abs() < 1e-5);
        assert!((grads[1] - 6.0).abs() < 1e-5);
    }

    #[test]
    fn numeric_grad_does_not_perturb_other_coordinates() {
        // f depends only on v[1]; df/dv0 must come out zero
        let f = |v: &[f64]| 3.0 * v[1];
        let grads = numeric_grad(f, &[10.0, 1.0], 1e-6);

        assert!(grads[0].abs() < 1e-9);
        assert!((grads[1] - 3.0).abs() < 1e-5);
    }

    #[test]
    fn max_abs_error_picks_worst_component() {
        let err = max_abs_error(&[1.0, 2.0, 3.0], &[1.1, 2.0, 2.7]);
        assert!((err - 0.3).abs() < 1e-12);
    }
}

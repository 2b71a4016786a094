//! Numerical gradient checking via centered finite differences.

use ndarray::{Array2, ArrayView2};

/// Floor for [`relative_error`] denominators so two exact zeros compare
/// equal instead of dividing by zero.
const DENOM_FLOOR: f64 = 1e-12;

/// Centered finite-difference gradient of `f` at `at`.
///
/// Perturbs one entry at a time by `±step` and takes
/// `(f(w + step) − f(w − step)) / (2 · step)`. Costs two evaluations of `f`
/// per weight entry, so this is a verification tool, not a training path.
pub fn numerical_gradient<F>(f: F, at: ArrayView2<f64>, step: f64) -> Array2<f64>
where
    F: Fn(ArrayView2<f64>) -> f64,
{
    let mut probe = at.to_owned();
    let mut grad = Array2::zeros(at.dim());

    for ((r, c), g) in grad.indexed_iter_mut() {
        let orig = probe[[r, c]];

        probe[[r, c]] = orig + step;
        let above = f(probe.view());

        probe[[r, c]] = orig - step;
        let below = f(probe.view());

        probe[[r, c]] = orig;
        *g = (above - below) / (2.0 * step);
    }

    grad
}

/// Relative error between two scalars: `|a − b| / max(|a|, |b|)`, floored.
pub fn relative_error(a: f64, b: f64) -> f64 {
    (a - b).abs() / a.abs().max(b.abs()).max(DENOM_FLOOR)
}

use ndarray::{Array2, ArrayView2, Axis};

use super::Objective;
use crate::{ObjectiveError, Result};

/// Softmax cross-entropy objective computed with explicit loops over samples
/// and classes.
///
/// Asymptotically slow, but simple enough to verify by inspection; serves as
/// the correctness reference for [`VectorizedSoftmax`], which must agree with
/// it to floating-point tolerance.
#[derive(Default, Clone, Copy)]
pub struct NaiveSoftmax;

impl NaiveSoftmax {
    /// Returns a new `NaiveSoftmax`.
    pub fn new() -> Self {
        Self
    }
}

impl Objective for NaiveSoftmax {
    fn loss_grad(
        &self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<(f64, Array2<f64>)> {
        validate(&weights, &features, labels)?;

        let samples = features.nrows();
        let classes = weights.ncols();

        let mut loss = 0.0;
        let mut grad = Array2::<f64>::zeros(weights.dim());

        for (i, &label) in labels.iter().enumerate() {
            let row = features.row(i);
            let scores = row.dot(&weights);

            // Shift by the row maximum before exponentiating so exp cannot
            // overflow. The softmax is invariant under a per-row shift.
            let max = scores.iter().fold(f64::NEG_INFINITY, |m, &s| m.max(s));
            let exp_scores = scores.mapv(|s| (s - max).exp());

            let mut denom = 0.0;
            for j in 0..classes {
                denom += exp_scores[j];
            }

            loss -= (exp_scores[label] / denom).ln();

            for j in 0..classes {
                let p = exp_scores[j] / denom;
                let coeff = if j == label { p - 1.0 } else { p };
                grad.column_mut(j).scaled_add(coeff, &row);
            }
        }

        loss /= samples as f64;
        grad /= samples as f64;

        loss += reg * weights.pow2().sum();
        grad.scaled_add(reg, &weights);

        Ok((loss, grad))
    }
}

/// Softmax cross-entropy objective computed with whole-matrix algebra.
///
/// One matrix product for all scores, row-wise reductions for the stability
/// shift and the normalizer, broadcast division for the probabilities, and a
/// single indexed pass over `(sample, label)` pairs. No loops over classes or
/// feature dimensions.
#[derive(Default, Clone, Copy)]
pub struct VectorizedSoftmax;

impl VectorizedSoftmax {
    /// Returns a new `VectorizedSoftmax`.
    pub fn new() -> Self {
        Self
    }
}

impl Objective for VectorizedSoftmax {
    fn loss_grad(
        &self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<(f64, Array2<f64>)> {
        validate(&weights, &features, labels)?;

        let samples = features.nrows();

        let scores = features.dot(&weights);
        let maxes = scores.fold_axis(Axis(1), f64::NEG_INFINITY, |m, &s| m.max(s));
        let shifted = &scores - &maxes.insert_axis(Axis(1));
        let exp_scores = shifted.mapv(f64::exp);
        let denoms = exp_scores.sum_axis(Axis(1));
        let mut probs = &exp_scores / &denoms.insert_axis(Axis(1));

        // One pass over the labels gathers the true-class probabilities for
        // the loss and scatters the one-hot subtraction into `probs`, which
        // then holds d(loss)/d(scores) up to the 1/N factor.
        let mut loss = 0.0;
        for (i, &label) in labels.iter().enumerate() {
            loss -= probs[[i, label]].ln();
            probs[[i, label]] -= 1.0;
        }

        loss /= samples as f64;
        loss += reg * weights.pow2().sum();

        let mut grad = features.t().dot(&probs);
        grad /= samples as f64;
        grad.scaled_add(reg, &weights);

        Ok((loss, grad))
    }
}

fn validate(
    weights: &ArrayView2<f64>,
    features: &ArrayView2<f64>,
    labels: &[usize],
) -> Result<()> {
    if weights.nrows() != features.ncols() {
        return Err(ObjectiveError::ShapeMismatch {
            a: "weights rows",
            b: "features columns",
            got: weights.nrows(),
            expected: features.ncols(),
        });
    }

    if labels.len() != features.nrows() {
        return Err(ObjectiveError::ShapeMismatch {
            a: "labels",
            b: "features rows",
            got: labels.len(),
            expected: features.nrows(),
        });
    }

    if features.nrows() == 0 {
        return Err(ObjectiveError::InvalidInput("minibatch is empty"));
    }

    let classes = weights.ncols();
    for (index, &label) in labels.iter().enumerate() {
        if label >= classes {
            return Err(ObjectiveError::InvalidLabel { index, label, classes });
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use ndarray::Array2;

    use super::*;

    #[test]
    fn rejects_out_of_range_label() {
        let w = Array2::<f64>::zeros((2, 3));
        let x = Array2::<f64>::zeros((4, 2));
        let y = [0, 1, 3, 2];

        let err = NaiveSoftmax
            .loss_grad(w.view(), x.view(), &y, 0.0)
            .unwrap_err();

        assert!(matches!(
            err,
            ObjectiveError::InvalidLabel { index: 2, label: 3, classes: 3 }
        ));
    }

    #[test]
    fn rejects_feature_dimension_mismatch() {
        let w = Array2::<f64>::zeros((5, 3));
        let x = Array2::<f64>::zeros((4, 2));
        let y = [0, 1, 2, 0];

        let err = VectorizedSoftmax
            .loss_grad(w.view(), x.view(), &y, 0.0)
            .unwrap_err();

        assert!(matches!(
            err,
            ObjectiveError::ShapeMismatch { got: 5, expected: 2, .. }
        ));
    }

    #[test]
    fn rejects_label_count_mismatch() {
        let w = Array2::<f64>::zeros((2, 3));
        let x = Array2::<f64>::zeros((4, 2));
        let y = [0, 1];

        let err = NaiveSoftmax
            .loss_grad(w.view(), x.view(), &y, 0.0)
            .unwrap_err();

        assert!(matches!(
            err,
            ObjectiveError::ShapeMismatch { got: 2, expected: 4, .. }
        ));
    }

    #[test]
    fn rejects_empty_minibatch() {
        let w = Array2::<f64>::zeros((2, 3));
        let x = Array2::<f64>::zeros((0, 2));
        let y: [usize; 0] = [];

        let err = VectorizedSoftmax
            .loss_grad(w.view(), x.view(), &y, 0.0)
            .unwrap_err();

        assert!(matches!(err, ObjectiveError::InvalidInput(_)));
    }
}

mod softmax;

pub use softmax::{NaiveSoftmax, VectorizedSoftmax};

use ndarray::{Array2, ArrayView2};

use crate::Result;

/// A differentiable objective over the weights of a linear classifier.
///
/// An `Objective` maps a weight matrix, a minibatch and a regularization
/// strength to a scalar loss and the gradient of that loss with respect to
/// the weights. It does not:
/// - own or update the weights,
/// - access datasets,
/// - implement training loops.
///
/// Those belong to the optimizer driving it.
///
/// The L2 penalty adds `reg * Σ w²` to the loss and `reg * w` to the
/// gradient. The gradient term is *not* the exact derivative `2 * reg * w`
/// of the loss term; callers calibrated against the `reg * w` scaling depend
/// on it, so implementations must keep it.
pub trait Objective {
    /// Evaluates the loss and its gradient for one minibatch.
    ///
    /// # Arguments
    /// * `weights` - Weight matrix of shape `(features, classes)`.
    /// * `features` - Minibatch of shape `(samples, features)`.
    /// * `labels` - One class index per sample, each in `[0, classes)`.
    /// * `reg` - L2 regularization strength, conventionally non-negative.
    ///
    /// # Returns
    /// The scalar loss and a gradient matrix with the shape of `weights`.
    ///
    /// # Errors
    /// Returns `ObjectiveError::ShapeMismatch` when the matrix dimensions or
    /// the label count disagree, `ObjectiveError::InvalidLabel` when a label
    /// is out of range, and `ObjectiveError::InvalidInput` when the minibatch
    /// is empty.
    fn loss_grad(
        &self,
        weights: ArrayView2<f64>,
        features: ArrayView2<f64>,
        labels: &[usize],
        reg: f64,
    ) -> Result<(f64, Array2<f64>)>;
}

use std::fmt;

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, ObjectiveError>;

/// Errors produced when an objective is evaluated on invalid inputs.
#[derive(Debug)]
pub enum ObjectiveError {
    /// An input is invalid for semantic or domain reasons.
    InvalidInput(&'static str),

    /// A label value falls outside `[0, classes)`.
    InvalidLabel {
        /// Position of the offending label in the label sequence.
        index: usize,
        /// The offending value.
        label: usize,
        /// Number of classes the weight matrix defines.
        classes: usize,
    },

    /// A shape invariant was violated (e.g. mismatched dimensions).
    ShapeMismatch {
        /// Name of the dimension that was measured.
        a: &'static str,
        /// Name of the dimension it must match.
        b: &'static str,
        /// Observed value.
        got: usize,
        /// Expected value.
        expected: usize,
    },
}

impl fmt::Display for ObjectiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectiveError::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            ObjectiveError::InvalidLabel { index, label, classes } => {
                write!(f, "label {label} at index {index} is out of range for {classes} classes")
            }
            ObjectiveError::ShapeMismatch { a, b, got, expected } => {
                write!(f, "shape mismatch between {a} and {b}: got {got}, expected {expected}")
            }
        }
    }
}

impl std::error::Error for ObjectiveError {}

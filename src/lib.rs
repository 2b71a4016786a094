pub mod error;
pub mod gradcheck;
pub mod objective;

pub use error::{ObjectiveError, Result};
pub use objective::{NaiveSoftmax, Objective, VectorizedSoftmax};

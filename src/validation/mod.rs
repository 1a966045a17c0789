mod cross_validator;
mod fitter;
mod partition;

pub use cross_validator::{CrossValidation, CrossValidator, FoldFailure, TrialResult};
pub use fitter::Fitter;
pub use partition::{Fold, partition, partition_with};

use std::{error::Error, fmt};

use crate::data::DataError;

/// Recoverable errors scoped to a single cross-validation fold.
///
/// The cross validator logs them and moves on to the next fold.
#[derive(Debug, Clone, PartialEq)]
pub enum FoldError {
    /// A column cannot be standardized (empty or zero variance).
    DegenerateInput(&'static str),

    /// The gradient norm became NaN or infinite.
    NonFiniteGradient { iteration: u64 },

    /// The line search shrank the learning rate too many times without
    /// satisfying the Armijo condition.
    LineSearchExhausted { iteration: u64, rate: f64 },

    /// Mapping parameters back to original units produced NaN or infinity.
    NonFiniteResult { t0: f64, t1: f64 },
}

impl fmt::Display for FoldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FoldError::DegenerateInput(what) => write!(f, "degenerate input: {what}"),
            FoldError::NonFiniteGradient { iteration } => {
                write!(f, "gradient is not finite at iteration {iteration}")
            }
            FoldError::LineSearchExhausted { iteration, rate } => write!(
                f,
                "line search exhausted at iteration {iteration}, learning rate shrank to {rate:e}"
            ),
            FoldError::NonFiniteResult { t0, t1 } => {
                write!(f, "fitted parameters are not finite: t0={t0} t1={t1}")
            }
        }
    }
}

impl Error for FoldError {}

/// Fatal errors that abort a whole training run.
#[derive(Debug)]
pub enum TrainError {
    /// A setting is out of range, caught before any data is touched.
    InvalidConfig(String),

    /// The dataset is too small for the requested amount of folds.
    InsufficientData { len: usize, n_parts: usize },

    /// Every fold failed.
    NoValidResult { failures: usize },

    /// The dataset could not be loaded.
    Data(DataError),
}

impl fmt::Display for TrainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainError::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            TrainError::InsufficientData { len, n_parts } => write!(
                f,
                "less data size: {len} samples cannot be split into {n_parts} folds of at least 2 samples"
            ),
            TrainError::NoValidResult { failures } => {
                write!(f, "no valid results: all {failures} folds failed")
            }
            TrainError::Data(e) => write!(f, "dataset error: {e}"),
        }
    }
}

impl Error for TrainError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TrainError::Data(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DataError> for TrainError {
    fn from(value: DataError) -> Self {
        Self::Data(value)
    }
}

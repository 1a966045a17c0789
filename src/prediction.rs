use std::{error::Error, fmt};

use crate::model::ModelParams;

/// Errors of a single prediction call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictError {
    /// The input value is NaN or infinite.
    NonFiniteInput(f64),

    /// The model produced a NaN or infinite value.
    NonFiniteResult(f64),
}

impl fmt::Display for PredictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictError::NonFiniteInput(x) => write!(f, "input {x} is not finite"),
            PredictError::NonFiniteResult(y) => write!(f, "prediction {y} is not finite"),
        }
    }
}

impl Error for PredictError {}

/// Predicts `t0 + t1 * x`.
///
/// # Arguments
/// * `model` - The fitted parameters, only `t0` and `t1` are read.
/// * `x` - The input value.
///
/// # Returns
/// The predicted value.
///
/// # Errors
/// `PredictError::NonFiniteInput` if `x` is not finite and
/// `PredictError::NonFiniteResult` if the prediction overflows or is NaN.
pub fn predict(model: &ModelParams, x: f64) -> Result<f64, PredictError> {
    if !x.is_finite() {
        return Err(PredictError::NonFiniteInput(x));
    }

    let y = model.hypothesis(x);
    if !y.is_finite() {
        return Err(PredictError::NonFiniteResult(y));
    }

    Ok(y)
}

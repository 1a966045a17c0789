//! Affine standardization of a numeric column and its inverse on fitted
//! parameters.
//!
//! A column `raw` is mapped to `scale * (raw + shift)`, where `shift` centers
//! the column and `scale` brings its sum of squares to one.

use crate::{data::Dataset, error::FoldError, model::ModelParams};

/// The two parameters of the affine map `x -> scale * (x + shift)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardizationParams {
    pub scale: f64,
    pub shift: f64,
}

impl StandardizationParams {
    /// Computes the standardization parameters of `column`.
    ///
    /// # Arguments
    /// * `column` - The raw values.
    ///
    /// # Returns
    /// `shift = -mean(column)` and `scale = 1 / sqrt(sum((x + shift)^2))`.
    ///
    /// # Errors
    /// `FoldError::DegenerateInput` if the column is empty, constant, or the
    /// scale is not finite.
    pub fn fit(column: &[f64]) -> Result<Self, FoldError> {
        if column.is_empty() {
            return Err(FoldError::DegenerateInput("column is empty"));
        }

        let n = column.len() as f64;
        let shift = -column.iter().sum::<f64>() / n;
        let ss: f64 = column.iter().map(|x| (x + shift).powi(2)).sum();

        if ss == 0.0 {
            return Err(FoldError::DegenerateInput("column has zero variance"));
        }

        let scale = 1.0 / ss.sqrt();
        if !scale.is_finite() || !shift.is_finite() {
            return Err(FoldError::DegenerateInput("column scale is not finite"));
        }

        Ok(Self { scale, shift })
    }

    /// Maps a single raw value.
    #[inline]
    pub fn apply_one(&self, x: f64) -> f64 {
        self.scale * (x + self.shift)
    }

    /// Maps every value of `column`.
    pub fn apply(&self, column: &[f64]) -> Vec<f64> {
        column.iter().map(|&x| self.apply_one(x)).collect()
    }

    /// Maps a standardized value back to original units.
    #[inline]
    pub fn restore_one(&self, z: f64) -> f64 {
        z / self.scale - self.shift
    }
}

/// Standardizes both columns of `dataset`.
///
/// # Returns
/// The parameters for `x`, the parameters for `y` and the standardized dataset.
///
/// # Errors
/// `FoldError::DegenerateInput` if either column is constant.
pub fn standardize_dataset(
    dataset: &Dataset,
) -> Result<(StandardizationParams, StandardizationParams, Dataset), FoldError> {
    let px = StandardizationParams::fit(dataset.xs())
        .map_err(|_| FoldError::DegenerateInput("x column has zero variance"))?;
    let py = StandardizationParams::fit(dataset.ys())
        .map_err(|_| FoldError::DegenerateInput("y column has zero variance"))?;

    let standardized = Dataset::from_columns_unchecked(px.apply(dataset.xs()), py.apply(dataset.ys()));
    Ok((px, py, standardized))
}

/// Maps parameters fitted on standardized data back to original units.
///
/// With `xs = ax * (x + bx)` and `ys = ay * (y + by)`, the line
/// `ys = t0 + t1 * xs` becomes
/// `y = (t0 + t1*ax*bx - ay*by) / ay + (t1*ax/ay) * x`.
///
/// # Arguments
/// * `model` - The parameters fitted on standardized data.
/// * `px` - The parameters used on the `x` column.
/// * `py` - The parameters used on the `y` column.
///
/// # Returns
/// The parameters in original units; `error2` and `iterations` are kept.
///
/// # Errors
/// `FoldError::NonFiniteResult` if either parameter is not finite.
pub fn invert(
    model: &ModelParams,
    px: &StandardizationParams,
    py: &StandardizationParams,
) -> Result<ModelParams, FoldError> {
    let t0 = (model.t0 + model.t1 * px.scale * px.shift - py.scale * py.shift) / py.scale;
    let t1 = model.t1 * px.scale / py.scale;

    if !t0.is_finite() || !t1.is_finite() {
        return Err(FoldError::NonFiniteResult { t0, t1 });
    }

    Ok(ModelParams { t0, t1, ..*model })
}

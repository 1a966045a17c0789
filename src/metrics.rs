use std::fmt;

use crate::{data::Dataset, model::ModelParams};

/// Accuracy of a model measured on a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Precision {
    /// Residual sum of squares.
    pub error2: f64,
    /// Coefficient of determination, NaN when `y` is constant.
    pub r2: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
}

/// Measures how well `model` fits `data`.
///
/// # Arguments
/// * `data` - The samples to score the model against.
/// * `model` - The model, in the same units as `data`.
///
/// # Returns
/// The `Precision` of the model. Never fails: a constant `y` column yields a
/// NaN `r2`.
pub fn evaluate(data: &Dataset, model: &ModelParams) -> Precision {
    let n = data.len() as f64;
    let mean_y = data.ys().iter().sum::<f64>() / n;

    let (error2, abs_sum, total_ss) =
        data.iter()
            .fold((0.0, 0.0, 0.0), |(e2, abs, tss), s| {
                let r = s.y - model.hypothesis(s.x);
                (e2 + r * r, abs + r.abs(), tss + (s.y - mean_y).powi(2))
            });

    let r2 = if total_ss == 0.0 {
        f64::NAN
    } else {
        1.0 - error2 / total_ss
    };

    Precision {
        error2,
        r2,
        rmse: (error2 / n).sqrt(),
        mae: abs_sum / n,
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  Error2: {:.6}\n  R2: {:.6}\n  RMSE: {:.6}\n  MAE: {:.6}",
            self.error2, self.r2, self.rmse, self.mae
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_fit_has_zero_error_and_unit_r2() {
        let data = Dataset::new(vec![0.0, 1.0, 2.0], vec![1.0, 3.0, 5.0]).unwrap();
        let p = evaluate(&data, &ModelParams::new(1.0, 2.0));

        assert_eq!(p.error2, 0.0);
        assert_eq!(p.r2, 1.0);
        assert_eq!(p.rmse, 0.0);
        assert_eq!(p.mae, 0.0);
    }

    #[test]
    fn metrics_match_hand_computed_values() {
        // residuals against y = x: [1, -1, 2, 0]
        let data = Dataset::new(vec![0.0, 1.0, 2.0, 3.0], vec![1.0, 0.0, 4.0, 3.0]).unwrap();
        let p = evaluate(&data, &ModelParams::new(0.0, 1.0));

        // mean y = 2, total ss = 1 + 4 + 4 + 1 = 10
        assert!((p.error2 - 6.0).abs() < 1e-12);
        assert!((p.r2 - 0.4).abs() < 1e-12);
        assert!((p.rmse - 1.5_f64.sqrt()).abs() < 1e-12);
        assert!((p.mae - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_y_reports_nan_r2() {
        let data = Dataset::new(vec![0.0, 1.0, 2.0], vec![2.0, 2.0, 2.0]).unwrap();
        let p = evaluate(&data, &ModelParams::new(0.0, 0.0));

        assert!(p.r2.is_nan());
        assert!((p.error2 - 12.0).abs() < 1e-12);
    }

    #[test]
    fn display_lists_every_metric() {
        let p = Precision {
            error2: 1.0,
            r2: 0.5,
            rmse: 0.25,
            mae: 0.125,
        };
        assert_eq!(
            p.to_string(),
            "  Error2: 1.000000\n  R2: 0.500000\n  RMSE: 0.250000\n  MAE: 0.125000"
        );
    }
}

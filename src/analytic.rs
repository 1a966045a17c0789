use std::fmt;

use crate::{data::Dataset, model::ModelParams};

/// The squared error of a line over a dataset, as a quadratic in `(t0, t1)`:
///
/// `E(t0, t1) = a*t0² + b*t1² + c*t0 + d*t0*t1 + e*t1 + f`
///
/// Used to cross-check gradient descent against the exact least-squares
/// solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorSurface {
    /// Sample count.
    pub a: f64,
    /// `Σx²`.
    pub b: f64,
    /// `-2Σy`.
    pub c: f64,
    /// `2Σx`.
    pub d: f64,
    /// `-2Σxy`.
    pub e: f64,
    /// `Σy²`.
    pub f: f64,
}

impl ErrorSurface {
    /// Accumulates the surface coefficients of `data`.
    pub fn from_dataset(data: &Dataset) -> Self {
        let (m, xx, x, y, xy, yy) = data.iter().fold(
            (0.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            |(m, xx, x, y, xy, yy), s| {
                (
                    m + 1.0,
                    xx + s.x * s.x,
                    x + s.x,
                    y + s.y,
                    xy + s.x * s.y,
                    yy + s.y * s.y,
                )
            },
        );

        Self {
            a: m,
            b: xx,
            c: -2.0 * y,
            d: 2.0 * x,
            e: -2.0 * xy,
            f: yy,
        }
    }

    /// Squared error of the line `t0 + t1 * x`.
    pub fn eval(&self, t0: f64, t1: f64) -> f64 {
        self.a * t0 * t0
            + self.b * t1 * t1
            + self.c * t0
            + self.d * t0 * t1
            + self.e * t1
            + self.f
    }

    /// Partial derivatives `(∂E/∂t0, ∂E/∂t1)`.
    pub fn gradient(&self, t0: f64, t1: f64) -> (f64, f64) {
        (
            2.0 * self.a * t0 + self.c + self.d * t1,
            2.0 * self.b * t1 + self.d * t0 + self.e,
        )
    }

    /// Determinant of the Hessian. Constant over the surface; when positive
    /// the surface is strictly convex and its only minimum is global.
    pub fn hessian_determinant(&self) -> f64 {
        4.0 * self.a * self.b - self.d * self.d
    }

    /// The exact least-squares line, `None` when `x` is constant.
    pub fn minimizer(&self) -> Option<ModelParams> {
        // m*Σx² - (Σx)², written with the stored coefficients.
        let m = self.a;
        let (sx, sy, sxy) = (self.d / 2.0, -self.c / 2.0, -self.e / 2.0);
        let denominator = m * self.b - sx * sx;
        if denominator == 0.0 || !denominator.is_finite() {
            return None;
        }

        let t0 = (self.b * sy - sx * sxy) / denominator;
        let t1 = (m * sxy - sx * sy) / denominator;
        let mut params = ModelParams::new(t0, t1);
        params.error2 = self.eval(t0, t1);
        Some(params)
    }
}

impl fmt::Display for ErrorSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "E(t0, t1) = {} * t0 * t0 + {} * t1 * t1 + {} * t0 + {} * t0 * t1 + {} * t1 + {}",
            self.a, self.b, self.c, self.d, self.e, self.f
        )?;
        write!(f, "hessian = {}", self.hessian_determinant())
    }
}

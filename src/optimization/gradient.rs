//! Math kernels of the squared error surface of `y = t0 + t1 * x`.
use crate::data::Dataset;

/// Squared error and its partial sums at a point `(t0, t1)`.
///
/// - `error2 = sum_i (yhat_i - y_i)^2`
/// - `s0 = sum_i (yhat_i - y_i)`
/// - `s1 = sum_i (yhat_i - y_i) * x_i`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub error2: f64,
    pub s0: f64,
    pub s1: f64,
}

impl Gradient {
    /// Evaluates the error and gradient sums over `data` at `(t0, t1)`.
    pub fn at(data: &Dataset, t0: f64, t1: f64) -> Self {
        let mut error2 = 0.0;
        let mut s0 = 0.0;
        let mut s1 = 0.0;

        for s in data.iter() {
            let err = t0 + t1 * s.x - s.y;
            error2 += err * err;
            s0 += err;
            s1 += err * s.x;
        }

        Self { error2, s0, s1 }
    }

    /// Magnitude of the gradient sums, `sqrt(s0^2 + s1^2)`.
    #[inline]
    pub fn norm(&self) -> f64 {
        (self.s0 * self.s0 + self.s1 * self.s1).sqrt()
    }

    /// Descent direction `(-s0 / m, -s1 / m)` for `m` samples.
    #[inline]
    pub fn direction(&self, m: usize) -> (f64, f64) {
        let m = m as f64;
        (-self.s0 / m, -self.s1 / m)
    }
}

/// Residual sum of squares over `data` at `(t0, t1)`.
pub fn error2_at(data: &Dataset, t0: f64, t1: f64) -> f64 {
    data.iter()
        .map(|s| {
            let err = t0 + t1 * s.x - s.y;
            err * err
        })
        .sum()
}

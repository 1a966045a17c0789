/// Parameters of the line `y = t0 + t1 * x`, plus fit diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    pub t0: f64,
    pub t1: f64,
    /// Residual sum of squares measured before the last accepted step.
    pub error2: f64,
    /// Amount of accepted gradient-descent steps.
    pub iterations: u64,
}

impl ModelParams {
    /// Returns a new `ModelParams` with no fit diagnostics.
    ///
    /// # Arguments
    /// * `t0` - The intercept.
    /// * `t1` - The slope.
    pub fn new(t0: f64, t1: f64) -> Self {
        Self {
            t0,
            t1,
            error2: f64::INFINITY,
            iterations: 0,
        }
    }

    /// Evaluates the hypothesis at `x` without any finiteness check.
    #[inline]
    pub fn hypothesis(&self, x: f64) -> f64 {
        self.t0 + self.t1 * x
    }
}

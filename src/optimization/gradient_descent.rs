use log::{debug, trace};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

use super::gradient::{Gradient, error2_at};
use crate::{
    config::TrainingSettings,
    data::Dataset,
    error::{FoldError, TrainError},
    model::ModelParams,
};

/// Factor applied to the learning rate on every rejected line search candidate.
const SHRINK: f64 = 0.99;

/// One accepted gradient-descent step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// 1-based index of the step.
    pub iteration: u64,
    /// The learning rate the line search accepted.
    pub rate: f64,
    /// Gradient norm at the point the step was taken from.
    pub gradient_norm: f64,
    /// Squared error before the step.
    pub error2_before: f64,
    /// Squared error after the step.
    pub error2_after: f64,
}

/// Batch gradient descent with a backtracking line search on the Armijo
/// condition.
///
/// The learning rate starts at `initial_learning_rate` for every `fit` call
/// and only shrinks from there, the accepted rate of one iteration is the
/// starting rate of the next one.
#[derive(Debug, Clone)]
pub struct GradientDescent {
    initial_learning_rate: f64,
    max_iterations: usize,
    epsilon: f64,
    xi: f64,
    max_backtracks: usize,
    init: Uniform<f64>,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `settings` - The training settings, expected to be validated.
    ///
    /// # Errors
    /// `TrainError::InvalidConfig` if `init_range` does not describe a valid
    /// range.
    pub fn new(settings: &TrainingSettings) -> Result<Self, TrainError> {
        let l = settings.init_range;
        let init = Uniform::new_inclusive(-l, l)
            .map_err(|e| TrainError::InvalidConfig(format!("init_range {l}: {e}")))?;

        Ok(Self {
            initial_learning_rate: settings.initial_learning_rate,
            max_iterations: settings.max_iterations,
            epsilon: settings.epsilon,
            xi: settings.xi,
            max_backtracks: settings.max_backtracks,
            init,
        })
    }

    /// Fits `t0` and `t1` on `data`.
    ///
    /// # Arguments
    /// * `data` - The training samples.
    /// * `rng` - Source of the initial parameters.
    ///
    /// # Errors
    /// `FoldError::NonFiniteGradient` or `FoldError::LineSearchExhausted`.
    pub fn fit<R: Rng + ?Sized>(&self, data: &Dataset, rng: &mut R) -> Result<ModelParams, FoldError> {
        self.fit_observed(data, rng, |_| {})
    }

    /// Same as `fit`, calling `on_step` after every accepted step.
    pub fn fit_observed<R, F>(
        &self,
        data: &Dataset,
        rng: &mut R,
        mut on_step: F,
    ) -> Result<ModelParams, FoldError>
    where
        R: Rng + ?Sized,
        F: FnMut(&Step),
    {
        let t0 = self.init.sample(rng);
        let t1 = self.init.sample(rng);
        let mut params = ModelParams::new(t0, t1);
        let mut rate = self.initial_learning_rate;

        for _ in 0..self.max_iterations {
            let grad = Gradient::at(data, params.t0, params.t1);
            let ms = grad.norm();

            if !ms.is_finite() {
                return Err(FoldError::NonFiniteGradient {
                    iteration: params.iterations,
                });
            }

            if ms < self.epsilon {
                debug!(iterations = params.iterations; "converged, gradient norm {ms:e}");
                break;
            }

            let (d0, d1) = grad.direction(data.len());
            let (accepted, error2_after) =
                self.line_search(data, &params, &grad, ms, (d0, d1), rate)?;
            rate = accepted;

            params.t0 += rate * d0;
            params.t1 += rate * d1;
            params.error2 = grad.error2;
            params.iterations += 1;

            let step = Step {
                iteration: params.iterations,
                rate,
                gradient_norm: ms,
                error2_before: grad.error2,
                error2_after,
            };
            trace!(
                iteration = step.iteration,
                rate = step.rate,
                error2 = step.error2_after;
                "step accepted"
            );
            on_step(&step);
        }

        Ok(params)
    }

    /// Shrinks `rate` until the candidate point satisfies
    /// `error2_candidate <= error2 + xi * rate * ms`, at most
    /// `max_backtracks` times.
    ///
    /// # Returns
    /// The accepted rate and the squared error at the candidate point.
    fn line_search(
        &self,
        data: &Dataset,
        params: &ModelParams,
        grad: &Gradient,
        ms: f64,
        (d0, d1): (f64, f64),
        mut rate: f64,
    ) -> Result<(f64, f64), FoldError> {
        let mut shrinks = 0;
        loop {
            let candidate = error2_at(data, params.t0 + rate * d0, params.t1 + rate * d1);

            if candidate <= grad.error2 + self.xi * rate * ms {
                return Ok((rate, candidate));
            }

            let next = rate * SHRINK;
            if shrinks == self.max_backtracks || next <= 0.0 {
                break;
            }
            rate = next;
            shrinks += 1;
        }

        Err(FoldError::LineSearchExhausted {
            iteration: params.iterations,
            rate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn line(t0: f64, t1: f64, xs: &[f64]) -> Dataset {
        let ys = xs.iter().map(|x| t0 + t1 * x).collect();
        Dataset::new(xs.to_vec(), ys).unwrap()
    }

    #[test]
    fn initial_parameters_are_drawn_within_range() {
        let settings = TrainingSettings {
            max_iterations: 1,
            init_range: 2.0,
            ..Default::default()
        };
        let gd = GradientDescent::new(&settings).unwrap();
        let data = line(0.0, 0.0, &[0.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(3);

        let mut first = None;
        gd.fit_observed(&data, &mut rng, |step| {
            first.get_or_insert(*step);
        })
        .unwrap();

        // y = 0 everywhere, so error2 at the start is the error of the drawn line.
        let step = first.unwrap();
        assert!(step.error2_before <= 2.0 * (2.0_f64 + 2.0).powi(2));
    }

    #[test]
    fn same_seed_gives_the_same_fit() {
        let gd = GradientDescent::new(&TrainingSettings::default()).unwrap();
        let data = line(-1.0, 0.5, &[-1.0, -0.5, 0.0, 0.5, 1.0]);

        let a = gd.fit(&data, &mut StdRng::seed_from_u64(11)).unwrap();
        let b = gd.fit(&data, &mut StdRng::seed_from_u64(11)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn converges_on_a_centered_line() {
        let gd = GradientDescent::new(&TrainingSettings::default()).unwrap();
        let xs: Vec<f64> = (-10..=10).map(|i| i as f64 / 5.0).collect();
        let data = line(3.0, 2.0, &xs);

        let params = gd.fit(&data, &mut StdRng::seed_from_u64(1)).unwrap();
        assert!((params.t0 - 3.0).abs() < 1e-6, "t0 = {}", params.t0);
        assert!((params.t1 - 2.0).abs() < 1e-6, "t1 = {}", params.t1);
        assert!(params.iterations > 0);
    }

    #[test]
    fn accepted_steps_satisfy_the_armijo_bound() {
        let settings = TrainingSettings {
            xi: 0.8,
            ..Default::default()
        };
        let gd = GradientDescent::new(&settings).unwrap();
        let data = Dataset::new(
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            vec![1.1, 2.9, 5.2, 7.1, 8.8, 11.2],
        )
        .unwrap();

        let mut steps = Vec::new();
        gd.fit_observed(&data, &mut StdRng::seed_from_u64(5), |s| steps.push(*s))
            .unwrap();

        assert!(!steps.is_empty());
        let mut last_rate = settings.initial_learning_rate;
        for s in &steps {
            assert!(s.error2_after <= s.error2_before + settings.xi * s.rate * s.gradient_norm);
            assert!(s.rate > 0.0 && s.rate <= last_rate);
            last_rate = s.rate;
        }
    }

    #[test]
    fn max_iterations_bounds_the_run() {
        let settings = TrainingSettings {
            max_iterations: 3,
            ..Default::default()
        };
        let gd = GradientDescent::new(&settings).unwrap();
        let data = line(3.0, 2.0, &[0.0, 1.0, 2.0, 3.0]);

        let params = gd.fit(&data, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(params.iterations, 3);
        assert!(params.error2.is_finite());
    }

    #[test]
    fn already_converged_start_takes_no_step() {
        let settings = TrainingSettings {
            epsilon: f64::MAX,
            ..Default::default()
        };
        let gd = GradientDescent::new(&settings).unwrap();
        let data = line(3.0, 2.0, &[0.0, 1.0, 2.0, 3.0]);

        let params = gd.fit(&data, &mut StdRng::seed_from_u64(2)).unwrap();
        assert_eq!(params.iterations, 0);
        assert!(params.error2.is_infinite());
    }

    #[test]
    fn overflowing_data_is_a_non_finite_gradient() {
        let gd = GradientDescent::new(&TrainingSettings::default()).unwrap();
        let data = Dataset::new(vec![1e200, -1e200], vec![1e200, 1e200]).unwrap();

        let err = gd.fit(&data, &mut StdRng::seed_from_u64(0)).unwrap_err();
        assert_eq!(err, FoldError::NonFiniteGradient { iteration: 0 });
    }

    #[test]
    fn bounded_line_search_gives_up() {
        let settings = TrainingSettings {
            initial_learning_rate: 1e6,
            xi: 1e-12,
            max_backtracks: 2,
            ..Default::default()
        };
        let gd = GradientDescent::new(&settings).unwrap();
        let data = line(3.0, 2.0, &[0.0, 10.0, 20.0, 30.0]);

        let err = gd.fit(&data, &mut StdRng::seed_from_u64(4)).unwrap_err();
        // Two shrinks, the reported rate is the last one evaluated.
        assert_eq!(
            err,
            FoldError::LineSearchExhausted {
                iteration: 0,
                rate: 1e6 * SHRINK * SHRINK,
            }
        );
    }
}

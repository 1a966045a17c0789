use log::debug;
use rand::rngs::StdRng;

use crate::{
    config::TrainingSettings,
    data::Dataset,
    error::{FoldError, TrainError},
    model::ModelParams,
    optimization::GradientDescent,
    preprocessing,
    validation::Fitter,
};

/// Fits one training subset: optional standardization, gradient descent and
/// mapping the parameters back to original units.
#[derive(Debug, Clone)]
pub struct FoldTrainer {
    optimizer: GradientDescent,
    with_standardize: bool,
}

impl FoldTrainer {
    /// Returns a new `FoldTrainer`.
    ///
    /// # Arguments
    /// * `settings` - The validated training settings.
    ///
    /// # Errors
    /// `TrainError::InvalidConfig` if the optimizer cannot be built.
    pub fn new(settings: &TrainingSettings) -> Result<Self, TrainError> {
        Ok(Self {
            optimizer: GradientDescent::new(settings)?,
            with_standardize: settings.with_standardize,
        })
    }
}

impl Fitter for FoldTrainer {
    fn fit(&self, train: &Dataset, rng: &mut StdRng) -> Result<ModelParams, FoldError> {
        if !self.with_standardize {
            return self.optimizer.fit(train, rng);
        }

        let (px, py, standardized) = preprocessing::standardize_dataset(train)?;
        debug!(
            x_scale = px.scale,
            x_shift = px.shift,
            y_scale = py.scale,
            y_shift = py.shift;
            "standardized training subset"
        );

        let params = self.optimizer.fit(&standardized, rng)?;
        preprocessing::invert(&params, &px, &py)
    }
}

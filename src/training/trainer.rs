use log::info;
use rand::{Rng, SeedableRng, rngs::StdRng};

use super::FoldTrainer;
use crate::{
    config::TrainingSettings,
    data::Dataset,
    error::TrainError,
    metrics::Precision,
    model::ModelParams,
    validation::{CrossValidation, CrossValidator, TrialResult},
};

/// Result of a whole training run.
#[derive(Debug, Clone)]
pub struct TrainOutcome {
    report: CrossValidation,
}

impl TrainOutcome {
    /// The picked model, in original units.
    pub fn model(&self) -> &ModelParams {
        &self.report.best().model
    }

    /// Accuracy of the picked model on its validation subset.
    pub fn precision(&self) -> &Precision {
        &self.report.best().precision
    }

    /// The picked trial, including its train and validation subsets.
    pub fn best(&self) -> &TrialResult {
        self.report.best()
    }

    /// Every fold outcome.
    pub fn report(&self) -> &CrossValidation {
        &self.report
    }
}

/// Trains a line on a dataset through k-fold cross validation.
pub struct Trainer {
    settings: TrainingSettings,
    validator: CrossValidator<FoldTrainer>,
}

impl Trainer {
    /// Returns a new `Trainer`.
    ///
    /// # Arguments
    /// * `settings` - The training settings.
    ///
    /// # Errors
    /// `TrainError::InvalidConfig` if any setting is out of range. Nothing
    /// about the data is checked here.
    pub fn new(settings: TrainingSettings) -> Result<Self, TrainError> {
        settings.validate()?;

        let fitter = FoldTrainer::new(&settings)?;
        let validator = CrossValidator::new(&settings, fitter)?;

        Ok(Self {
            settings,
            validator,
        })
    }

    pub fn settings(&self) -> &TrainingSettings {
        &self.settings
    }

    /// Builds the run's random generator from the configured seed, or from
    /// the OS when there is none.
    pub fn rng(&self) -> StdRng {
        match self.settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    /// Cross validates `dataset` and returns the best fold's model.
    ///
    /// # Arguments
    /// * `dataset` - The whole dataset.
    /// * `rng` - The run's random generator.
    ///
    /// # Errors
    /// `TrainError::InsufficientData` or `TrainError::NoValidResult`.
    pub fn train<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<TrainOutcome, TrainError> {
        info!(
            samples = dataset.len(),
            n_parts = self.settings.n_parts,
            standardize = self.settings.with_standardize;
            "training started"
        );

        let report = self.validator.run(dataset, rng)?;

        let best = report.best();
        info!(
            fold = best.fold + 1,
            failed_folds = report.failures().len();
            "picked: trial #{}\nt0: {:.6} t1: {:.6}\n{}",
            best.fold + 1,
            best.model.t0,
            best.model.t1,
            best.precision
        );

        Ok(TrainOutcome { report })
    }
}

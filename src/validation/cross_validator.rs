use std::fmt;

use log::{info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

use super::{
    Fitter,
    partition::{Fold, partition},
};
use crate::{
    config::TrainingSettings,
    data::Dataset,
    error::{FoldError, TrainError},
    metrics::{self, Precision},
    model::ModelParams,
};

/// Smallest validation subset a fold may have.
const MIN_FOLD_LEN: usize = 2;

/// Outcome of one successful fold.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialResult {
    /// 0-based fold index.
    pub fold: usize,
    /// Parameters fitted on `train`.
    pub model: ModelParams,
    /// Accuracy of `model` on `validation`.
    pub precision: Precision,
    pub train: Dataset,
    pub validation: Dataset,
}

impl fmt::Display for TrialResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "[trial #{} in {} iterations]\nt0: {:.6} t1: {:.6}",
            self.fold + 1,
            self.model.iterations,
            self.model.t0,
            self.model.t1
        )?;
        write!(f, "{}", self.precision)
    }
}

/// A fold that was abandoned.
#[derive(Debug, Clone, PartialEq)]
pub struct FoldFailure {
    pub fold: usize,
    pub error: FoldError,
}

/// Every fold outcome of a cross-validation run.
#[derive(Debug, Clone)]
pub struct CrossValidation {
    trials: Vec<TrialResult>,
    failures: Vec<FoldFailure>,
    best: usize,
}

impl CrossValidation {
    /// Successful folds, ordered by fold index.
    pub fn trials(&self) -> &[TrialResult] {
        &self.trials
    }

    /// Abandoned folds, ordered by fold index.
    pub fn failures(&self) -> &[FoldFailure] {
        &self.failures
    }

    /// The trial with the lowest validation error, the earliest fold on ties.
    pub fn best(&self) -> &TrialResult {
        &self.trials[self.best]
    }
}

/// k-fold cross validator.
///
/// Partitions the dataset, fits every fold through a `Fitter` and keeps the
/// model with the lowest squared error on its held-out samples.
pub struct CrossValidator<F: Fitter> {
    fitter: F,
    n_parts: usize,
    parallel: bool,
}

impl<F: Fitter> CrossValidator<F> {
    /// Returns a new `CrossValidator`.
    ///
    /// # Arguments
    /// * `settings` - Provides `n_parts` and `parallel`.
    /// * `fitter` - Fits each fold's training subset.
    ///
    /// # Errors
    /// `TrainError::InvalidConfig` if `n_parts < 2`.
    pub fn new(settings: &TrainingSettings, fitter: F) -> Result<Self, TrainError> {
        if settings.n_parts < 2 {
            return Err(TrainError::InvalidConfig(format!(
                "n_parts must be >= 2, got {}",
                settings.n_parts
            )));
        }

        Ok(Self {
            fitter,
            n_parts: settings.n_parts,
            parallel: settings.parallel,
        })
    }

    /// Runs every fold and picks the best one.
    ///
    /// The permutation is drawn from `rng` first, then one seed per fold in
    /// fold order, so sequential and parallel runs give the same result.
    ///
    /// # Arguments
    /// * `dataset` - The whole dataset.
    /// * `rng` - The run's random generator.
    ///
    /// # Errors
    /// - `TrainError::InsufficientData` if `dataset.len() / n_parts < 2`,
    ///   checked before any fold runs.
    /// - `TrainError::NoValidResult` if every fold failed.
    pub fn run<R: Rng + ?Sized>(
        &self,
        dataset: &Dataset,
        rng: &mut R,
    ) -> Result<CrossValidation, TrainError> {
        let len = dataset.len();
        if len / self.n_parts < MIN_FOLD_LEN {
            return Err(TrainError::InsufficientData {
                len,
                n_parts: self.n_parts,
            });
        }

        let folds = partition(len, self.n_parts, rng);
        let seeds: Vec<u64> = folds.iter().map(|_| rng.random()).collect();

        let outcomes: Vec<Result<TrialResult, FoldFailure>> = if self.parallel {
            folds
                .par_iter()
                .zip(seeds.par_iter())
                .map(|(fold, &seed)| self.run_fold(dataset, fold, seed))
                .collect()
        } else {
            folds
                .iter()
                .zip(&seeds)
                .map(|(fold, &seed)| self.run_fold(dataset, fold, seed))
                .collect()
        };

        let mut trials = Vec::with_capacity(outcomes.len());
        let mut failures = Vec::new();
        for outcome in outcomes {
            match outcome {
                Ok(trial) => {
                    info!(fold = trial.fold + 1; "trial finished\n{trial}");
                    trials.push(trial);
                }
                Err(failure) => {
                    warn!(fold = failure.fold + 1; "trial skipped: {}", failure.error);
                    failures.push(failure);
                }
            }
        }

        if trials.is_empty() {
            return Err(TrainError::NoValidResult {
                failures: failures.len(),
            });
        }

        let mut best = 0;
        for (i, trial) in trials.iter().enumerate().skip(1) {
            if trial.precision.error2 < trials[best].precision.error2 {
                best = i;
            }
        }

        Ok(CrossValidation {
            trials,
            failures,
            best,
        })
    }

    fn run_fold(&self, dataset: &Dataset, fold: &Fold, seed: u64) -> Result<TrialResult, FoldFailure> {
        let train = dataset.select(&fold.train);
        let validation = dataset.select(&fold.validation);
        let mut rng = StdRng::seed_from_u64(seed);

        let model = self
            .fitter
            .fit(&train, &mut rng)
            .map_err(|error| FoldFailure {
                fold: fold.index,
                error,
            })?;

        let precision = metrics::evaluate(&validation, &model);

        Ok(TrialResult {
            fold: fold.index,
            model,
            precision,
            train,
            validation,
        })
    }
}

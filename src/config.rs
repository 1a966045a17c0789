use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::TrainError;

pub const DEFAULT_LEARNING_RATE: f64 = 0.5;
pub const DEFAULT_PARTS: usize = 6;
pub const DEFAULT_MAX_ITERATIONS: usize = 100_000;
pub const DEFAULT_EPSILON: f64 = 1e-10;
pub const DEFAULT_XI: f64 = 0.8;
pub const DEFAULT_INIT_RANGE: f64 = 10.0;
pub const DEFAULT_MAX_BACKTRACKS: usize = 10_000;

/// Options driving a training run.
///
/// Missing fields take their default value when deserialized; unknown fields
/// are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingSettings {
    /// Learning rate the line search starts from in every fold.
    pub initial_learning_rate: f64,
    /// Amount of cross-validation folds.
    pub n_parts: usize,
    /// Upper bound on accepted gradient-descent steps per fold.
    pub max_iterations: usize,
    /// Training stops once the gradient norm drops below this value.
    pub epsilon: f64,
    /// Slack coefficient of the Armijo condition.
    pub xi: f64,
    /// Whether each fold is fitted on standardized columns.
    pub with_standardize: bool,
    /// Initial parameters are drawn from `[-init_range, init_range]`.
    pub init_range: f64,
    /// Upper bound on learning rate shrinks per iteration.
    pub max_backtracks: usize,
    /// Whether folds are fitted on the rayon thread pool.
    pub parallel: bool,
    /// Seed for the random generator, drawn from the OS when missing.
    pub seed: Option<u64>,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            initial_learning_rate: DEFAULT_LEARNING_RATE,
            n_parts: DEFAULT_PARTS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            epsilon: DEFAULT_EPSILON,
            xi: DEFAULT_XI,
            with_standardize: true,
            init_range: DEFAULT_INIT_RANGE,
            max_backtracks: DEFAULT_MAX_BACKTRACKS,
            parallel: false,
            seed: None,
        }
    }
}

impl TrainingSettings {
    /// Loads settings from a JSON file.
    ///
    /// # Arguments
    /// * `path` - Path to the JSON file.
    ///
    /// # Errors
    /// `TrainError::InvalidConfig` if the file cannot be read, is not valid
    /// JSON or has unknown fields. Values are not range checked here, see
    /// `validate`.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, TrainError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TrainError::InvalidConfig(format!("cannot read '{}': {e}", path.display()))
        })?;

        Self::from_json(&content)
    }

    /// Parses settings from a JSON string.
    ///
    /// # Errors
    /// `TrainError::InvalidConfig` if the text is not a valid settings object.
    pub fn from_json(content: &str) -> Result<Self, TrainError> {
        serde_json::from_str(content)
            .map_err(|e| TrainError::InvalidConfig(format!("invalid JSON: {e}")))
    }

    /// Checks every option is in range.
    ///
    /// # Errors
    /// `TrainError::InvalidConfig` naming the first offending option.
    pub fn validate(&self) -> Result<(), TrainError> {
        positive("initial_learning_rate", self.initial_learning_rate)?;
        positive("epsilon", self.epsilon)?;
        positive("xi", self.xi)?;
        positive("init_range", self.init_range)?;

        if self.n_parts < 2 {
            return Err(TrainError::InvalidConfig(format!(
                "n_parts must be >= 2, got {}",
                self.n_parts
            )));
        }

        if self.max_iterations < 1 {
            return Err(TrainError::InvalidConfig(
                "max_iterations must be >= 1".into(),
            ));
        }

        if self.max_backtracks < 1 {
            return Err(TrainError::InvalidConfig(
                "max_backtracks must be >= 1".into(),
            ));
        }

        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), TrainError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(TrainError::InvalidConfig(format!(
            "{name} must be a finite value > 0, got {value}"
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid(settings: TrainingSettings, field: &str) {
        match settings.validate() {
            Err(TrainError::InvalidConfig(msg)) => assert!(msg.contains(field), "{msg}"),
            other => panic!("expected invalid {field}, got {other:?}"),
        }
    }

    #[test]
    fn defaults_are_valid() {
        assert!(TrainingSettings::default().validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let base = TrainingSettings::default();

        assert_invalid(TrainingSettings { n_parts: 1, ..base.clone() }, "n_parts");
        assert_invalid(TrainingSettings { max_iterations: 0, ..base.clone() }, "max_iterations");
        assert_invalid(TrainingSettings { epsilon: 0.0, ..base.clone() }, "epsilon");
        assert_invalid(TrainingSettings { xi: -1.0, ..base.clone() }, "xi");
        assert_invalid(
            TrainingSettings { initial_learning_rate: f64::NAN, ..base.clone() },
            "initial_learning_rate",
        );
        assert_invalid(TrainingSettings { init_range: f64::INFINITY, ..base.clone() }, "init_range");
        assert_invalid(TrainingSettings { max_backtracks: 0, ..base }, "max_backtracks");
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let settings = TrainingSettings::from_json(r#"{ "n_parts": 4, "seed": 7 }"#).unwrap();
        assert_eq!(settings.n_parts, 4);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.xi, DEFAULT_XI);
        assert!(settings.with_standardize);
    }

    #[test]
    fn json_rejects_unknown_fields() {
        let err = TrainingSettings::from_json(r#"{ "n_part": 4 }"#).unwrap_err();
        assert!(matches!(err, TrainError::InvalidConfig(_)));
    }
}

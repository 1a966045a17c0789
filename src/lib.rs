//! Univariate linear regression fitted by gradient descent with Armijo
//! backtracking, model selection through k-fold cross validation.

pub mod analytic;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod model;
pub mod optimization;
pub mod persistence;
pub mod plot;
pub mod prediction;
pub mod preprocessing;
pub mod training;
pub mod validation;

pub use config::TrainingSettings;
pub use data::{DataError, Dataset, Sample};
pub use error::{FoldError, TrainError};
pub use metrics::Precision;
pub use model::ModelParams;
pub use prediction::{PredictError, predict};
pub use persistence::PersistError;
pub use training::{TrainOutcome, Trainer};

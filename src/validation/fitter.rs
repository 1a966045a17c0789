use rand::rngs::StdRng;

use crate::{data::Dataset, error::FoldError, model::ModelParams};

/// Fits a model on one fold's training subset.
///
/// This is the seam between the cross validator and the fitting procedure:
/// the cross validator only partitions, dispatches and scores, everything
/// about how a line is fitted lives behind this trait.
pub trait Fitter: Sync {
    /// Fits a model on `train`.
    ///
    /// # Args
    /// * `train` - The fold's training subset.
    /// * `rng` - The fold's private random generator.
    ///
    /// # Returns
    /// The fitted parameters, in the units of `train`.
    ///
    /// # Errors
    /// A `FoldError` abandons the fold without aborting the run.
    fn fit(&self, train: &Dataset, rng: &mut StdRng) -> Result<ModelParams, FoldError>;
}

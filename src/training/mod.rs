mod fold_trainer;
mod trainer;

pub use fold_trainer::FoldTrainer;
pub use trainer::{TrainOutcome, Trainer};

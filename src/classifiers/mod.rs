pub mod classifier;
pub mod grid_search;
pub mod naive_bayes;
pub mod results;

pub use classifier::{Classified, Classifier};
pub use grid_search::{GridRange, GridSearch, SearchConfig, SearchOutcome, Trial};
pub use naive_bayes::{
    FeatureSet, Hyperparameters, Likelihood, Model, Priors, Trainer, TrainingCounts,
};
pub use results::{ClassSummary, ClassificationSummary};

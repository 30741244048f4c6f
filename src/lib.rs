pub mod classifiers;
pub mod config;
pub mod corpus;
pub mod error;
pub mod generic_types;
pub mod logging;
pub mod options;
pub mod pipeline;
pub mod report;

pub use error::{Result, SpamFilterError};
pub use generic_types::{Label, LabeledCorpus};

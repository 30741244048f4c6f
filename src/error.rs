use std::io;
use std::path::PathBuf;

use config::ConfigError;
use thiserror::Error;

use crate::generic_types::Label;

#[derive(Error, Debug)]
pub enum SpamFilterError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Blank entry at line {line} of path list {list}")]
    MalformedPathList { list: PathBuf, line: usize },

    #[error("Classifier is not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Training set needs at least one spam and one ham email")]
    EmptyTrainingSet,

    #[error("Need {needed} {label} emails to hold out for evaluation, found {available}")]
    InsufficientEvaluationData {
        label: Label,
        needed: usize,
        available: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, SpamFilterError>;

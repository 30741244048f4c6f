use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use config::{builder::DefaultState, ConfigBuilder, ConfigError, Environment, File};

use crate::classifiers::{Hyperparameters, SearchConfig};
use crate::corpus::FeatureExtractor;
use crate::error::Result;

const DEFAULT_CONFIG_FILE: &str = "spamfilter";
const ENV_PREFIX: &str = "SPAMFILTER";

/// Where the four path lists and the email files live.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    pub emails_dir: PathBuf,
    pub spam_training: PathBuf,
    pub ham_training: PathBuf,
    pub spam_testing: PathBuf,
    pub ham_testing: PathBuf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub training: Hyperparameters,
    pub search: SearchConfig,
    pub logging: LoggingConfig,
}
impl Config {
    /// Defaults, then `spamfilter.{toml,json,...}` if present, then the environment.
    pub fn new() -> std::result::Result<Self, ConfigError> {
        Self::load(None)
    }

    /// Like [`Config::new`], but an explicit file must exist.
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let mut builder: ConfigBuilder<DefaultState> = ConfigBuilder::default();
        builder = Self::with_defaults(builder)?;

        builder = match path {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        // e.g. SPAMFILTER__TRAINING__K=10
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    fn with_defaults(
        builder: ConfigBuilder<DefaultState>,
    ) -> std::result::Result<ConfigBuilder<DefaultState>, ConfigError> {
        let training = Hyperparameters::default();
        let search = SearchConfig::default();

        builder
            .set_default("corpus.emails_dir", "emails")?
            .set_default("corpus.spam_training", "emailPaths/spamtraining.txt")?
            .set_default("corpus.ham_training", "emailPaths/hamtraining.txt")?
            .set_default("corpus.spam_testing", "emailPaths/spamtesting.txt")?
            .set_default("corpus.ham_testing", "emailPaths/hamtesting.txt")?
            .set_default("training.k", training.k as i64)?
            .set_default("training.laplace", training.laplace as i64)?
            .set_default("training.ngram", training.ngram as i64)?
            .set_default("search.eval_emails_count", search.eval_emails_count as i64)?
            .set_default("search.k.start", search.k.start as i64)?
            .set_default("search.k.end", search.k.end as i64)?
            .set_default("search.k.step", search.k.step as i64)?
            .set_default("search.k.inclusive", search.k.inclusive)?
            .set_default("search.laplace.start", search.laplace.start as i64)?
            .set_default("search.laplace.end", search.laplace.end as i64)?
            .set_default("search.laplace.step", search.laplace.step as i64)?
            .set_default("search.laplace.inclusive", search.laplace.inclusive)?
            .set_default("search.parallel", search.parallel)?
            .set_default("search.progress", search.progress)?
            .set_default("logging.level", "info")
    }

    pub fn validate(&self) -> Result<()> {
        FeatureExtractor::new(self.training.ngram)?;
        self.search.validate()
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "k={} laplace={} ngram={} emails_dir={}",
            self.training.k,
            self.training.laplace,
            self.training.ngram,
            self.corpus.emails_dir.display()
        )
    }
}

use std::fmt::Display;

use clap::ValueEnum;

/// Which training paths a run goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Train on the whole training set with the configured k and laplace.
    Direct,
    /// Pick k and laplace on a held-out slice, then classify the test set.
    Evaluated,
    /// Direct first, then evaluated.
    Both,
}
impl Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Direct => "direct",
            Self::Evaluated => "evaluated",
            Self::Both => "both",
        };
        write!(f, "{}", name)
    }
}

impl RunMode {
    pub fn runs_direct(&self) -> bool {
        matches!(self, RunMode::Direct | RunMode::Both)
    }

    pub fn runs_evaluated(&self) -> bool {
        matches!(self, RunMode::Evaluated | RunMode::Both)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Json => "json",
        };
        write!(f, "{}", name)
    }
}

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rs_spamfilter::config::Config;
use rs_spamfilter::corpus::FeatureExtractor;
use rs_spamfilter::logging::setup_logger;
use rs_spamfilter::options::{OutputFormat, RunMode};
use rs_spamfilter::pipeline::{self, Corpora};

/// Naive Bayes spam filter over labeled email corpora.
#[derive(Parser)]
#[command(name = "rs_spamfilter", version, about)]
struct Cli {
    /// Configuration file. Defaults to ./spamfilter.toml when it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Training paths to run.
    #[arg(long, value_enum, default_value_t = RunMode::Both)]
    mode: RunMode,

    /// Report format written to stdout.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Frequency threshold for the direct run.
    #[arg(long)]
    k: Option<usize>,

    /// Laplace smoothing constant for the direct run.
    #[arg(long)]
    laplace: Option<usize>,

    /// Word n-gram width.
    #[arg(long)]
    ngram: Option<usize>,

    /// trace, debug, info, warn or error.
    #[arg(long)]
    log_level: Option<String>,

    /// Sweep the search grid in parallel.
    #[arg(long)]
    parallel: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(k) = cli.k {
        config.training.k = k;
    }
    if let Some(laplace) = cli.laplace {
        config.training.laplace = laplace;
    }
    if let Some(ngram) = cli.ngram {
        config.training.ngram = ngram;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.parallel {
        config.search.parallel = true;
    }
    config.validate()?;

    setup_logger(&config.logging.level);
    info!(%config, mode = %cli.mode, "starting");

    let extractor = FeatureExtractor::new(config.training.ngram)?;
    let corpora = Corpora::load(&config.corpus, extractor).context("loading email corpora")?;
    let reports = pipeline::run(cli.mode, &corpora, config.training, config.search.clone())?;

    match cli.format {
        OutputFormat::Text => {
            for report in &reports {
                println!("{}", report.render_text());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
    }
    Ok(())
}

//! Load, train, classify and summarize.

use tracing::info;

use crate::classifiers::{
    Classifier, ClassificationSummary, GridSearch, Hyperparameters, Model, SearchConfig, Trainer,
};
use crate::config::CorpusConfig;
use crate::corpus::{CorpusLoader, Email, FeatureExtractor};
use crate::error::Result;
use crate::generic_types::{Label, LabeledCorpus};
use crate::options::RunMode;
use crate::report::Report;

/// Training and test emails for both classes.
#[derive(Debug, Clone)]
pub struct Corpora {
    pub training: LabeledCorpus<Email>,
    pub testing: LabeledCorpus<Email>,
}

impl Corpora {
    pub fn load(config: &CorpusConfig, extractor: FeatureExtractor) -> Result<Self> {
        info!(
            emails_dir = %config.emails_dir.display(),
            ngram = extractor.ngram(),
            "loading corpora"
        );
        let loader = CorpusLoader::new(&config.emails_dir, extractor);
        Ok(Self {
            training: LabeledCorpus::new(
                loader.load_list(&config.spam_training, Label::Spam)?,
                loader.load_list(&config.ham_training, Label::Ham)?,
            ),
            testing: LabeledCorpus::new(
                loader.load_list(&config.spam_testing, Label::Spam)?,
                loader.load_list(&config.ham_testing, Label::Ham)?,
            ),
        })
    }
}

/// Classify the test corpus with `model` and summarize it.
pub fn evaluate(mode: RunMode, model: Model, testing: &LabeledCorpus<Email>) -> Result<Report> {
    let hyperparameters = model.hyperparameters();
    let vocabulary_size = model.vocabulary_size();

    let classifier = Classifier::with_model(model);
    let spam = classifier.classify(&testing.spam)?;
    let ham = classifier.classify(&testing.ham)?;
    let summary = ClassificationSummary::new(&spam, &ham);
    info!(
        %mode,
        spam_accuracy = summary.spam.accuracy(),
        ham_accuracy = summary.ham.accuracy(),
        "classified test corpus"
    );

    Ok(Report::new(mode, hyperparameters, vocabulary_size, &summary))
}

/// Train on the full training corpus with fixed hyperparameters.
pub fn run_direct(corpora: &Corpora, hyperparameters: Hyperparameters) -> Result<Report> {
    let model = Trainer::new(hyperparameters).train(&corpora.training)?;
    info!(
        k = hyperparameters.k,
        laplace = hyperparameters.laplace,
        vocabulary = model.vocabulary_size(),
        "trained model"
    );
    evaluate(RunMode::Direct, model, &corpora.testing)
}

/// Search k and laplace on a held-out slice, then classify with the winner.
pub fn run_evaluated(corpora: &Corpora, search: SearchConfig, ngram: usize) -> Result<Report> {
    let outcome = GridSearch::new(search, ngram).run(&corpora.training)?;
    let correct = outcome.correct;
    let report = evaluate(RunMode::Evaluated, outcome.model, &corpora.testing)?;
    Ok(report.with_held_out_correct(correct))
}

/// Run the requested training paths in order: direct, then evaluated.
pub fn run(
    mode: RunMode,
    corpora: &Corpora,
    hyperparameters: Hyperparameters,
    search: SearchConfig,
) -> Result<Vec<Report>> {
    let mut reports = Vec::new();
    if mode.runs_direct() {
        reports.push(run_direct(corpora, hyperparameters)?);
    }
    if mode.runs_evaluated() {
        reports.push(run_evaluated(corpora, search, hyperparameters.ngram)?);
    }
    Ok(reports)
}

//! Hyperparameter search over (k, laplace).
//!
//! The first `eval_emails_count` emails of each class are held out. Every
//! pair of the grid is trained on the remaining emails with uniform priors
//! and scored by how many held-out emails it gets right. The first pair to
//! reach a strictly higher score wins, walking k then laplace in ascending
//! order.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classifiers::classifier::Classifier;
use crate::classifiers::naive_bayes::{Hyperparameters, Model, Priors, Trainer, TrainingCounts};
use crate::classifiers::results::ClassificationSummary;
use crate::corpus::Email;
use crate::error::{Result, SpamFilterError};
use crate::generic_types::{Label, LabeledCorpus};

/// Arithmetic range of candidate values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
    /// Whether `end` itself is a candidate.
    pub inclusive: bool,
}

impl GridRange {
    pub fn values(&self) -> Vec<usize> {
        let step = self.step.max(1);
        if self.inclusive {
            (self.start..=self.end).step_by(step).collect()
        } else {
            (self.start..self.end).step_by(step).collect()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Emails held out per class.
    pub eval_emails_count: usize,
    pub k: GridRange,
    pub laplace: GridRange,
    /// Run the sweep on the rayon pool.
    pub parallel: bool,
    /// Draw a progress bar while sweeping.
    pub progress: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            eval_emails_count: 20,
            k: GridRange {
                start: 0,
                end: 75,
                step: 5,
                inclusive: true,
            },
            laplace: GridRange {
                start: 0,
                end: 75,
                step: 5,
                inclusive: false,
            },
            parallel: false,
            progress: true,
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.k.step == 0 || self.laplace.step == 0 {
            return Err(SpamFilterError::InvalidConfig(
                "search ranges need a non-zero step".to_string(),
            ));
        }
        Ok(())
    }
}

/// Held-out score of one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub k: usize,
    pub laplace: usize,
    pub spam_correct: usize,
    pub ham_correct: usize,
}
impl Trial {
    pub fn correct(&self) -> usize {
        self.spam_correct + self.ham_correct
    }
}

/// The winning grid point, its model, and every trial in grid order.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub k: usize,
    pub laplace: usize,
    pub correct: usize,
    pub model: Model,
    pub trials: Vec<Trial>,
}

/// First trial with a strictly greater score than everything before it,
/// starting from zero. `None` when no trial gets anything right.
pub fn select_best(trials: &[Trial]) -> Option<Trial> {
    let mut best: Option<Trial> = None;
    let mut best_correct = 0;
    for trial in trials {
        if trial.correct() > best_correct {
            best_correct = trial.correct();
            best = Some(*trial);
        }
    }
    best
}

/// Split off the first `count` emails of a class for evaluation.
fn hold_out(emails: &[Email], label: Label, count: usize) -> Result<(&[Email], &[Email])> {
    if emails.len() < count {
        return Err(SpamFilterError::InsufficientEvaluationData {
            label,
            needed: count,
            available: emails.len(),
        });
    }
    Ok(emails.split_at(count))
}

pub struct GridSearch {
    config: SearchConfig,
    ngram: usize,
}

impl GridSearch {
    pub fn new(config: SearchConfig, ngram: usize) -> Self {
        Self { config, ngram }
    }

    fn grid(&self) -> Vec<(usize, usize)> {
        let laplaces = self.config.laplace.values();
        self.config
            .k
            .values()
            .into_iter()
            .flat_map(|k| laplaces.iter().map(move |&laplace| (k, laplace)))
            .collect()
    }

    fn trainer(&self, k: usize, laplace: usize) -> Trainer {
        Trainer::new(Hyperparameters {
            k,
            laplace,
            ngram: self.ngram,
        })
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(len as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message("Searching hyperparameters...");
        pb
    }

    pub fn run(&self, corpus: &LabeledCorpus<Email>) -> Result<SearchOutcome> {
        self.config.validate()?;
        let count = self.config.eval_emails_count;
        let (eval_spam, train_spam) = hold_out(corpus.get(Label::Spam), Label::Spam, count)?;
        let (eval_ham, train_ham) = hold_out(corpus.get(Label::Ham), Label::Ham, count)?;

        let grid = self.grid();
        info!(
            trials = grid.len(),
            held_out = count,
            train_spam = train_spam.len(),
            train_ham = train_ham.len(),
            parallel = self.config.parallel,
            "starting hyperparameter search"
        );

        let counts = TrainingCounts::gather(train_spam, train_ham);
        let pb = self.progress_bar(grid.len());
        let run_trial = |&(k, laplace): &(usize, usize)| -> Result<Trial> {
            let model = self.trainer(k, laplace).fit_counts(&counts, Priors::UNIFORM);
            let classifier = Classifier::with_model(model);
            let spam = classifier.classify(eval_spam)?;
            let ham = classifier.classify(eval_ham)?;
            let summary = ClassificationSummary::new(&spam, &ham);
            pb.inc(1);
            Ok(Trial {
                k,
                laplace,
                spam_correct: summary.spam.correct_count(),
                ham_correct: summary.ham.correct_count(),
            })
        };

        // Both paths keep grid order, so the reduction below sees trials the same way.
        let trials: Vec<Trial> = if self.config.parallel {
            grid.par_iter().map(run_trial).collect::<Result<Vec<_>>>()?
        } else {
            grid.iter().map(run_trial).collect::<Result<Vec<_>>>()?
        };
        pb.finish_with_message("Search complete!");

        for trial in &trials {
            debug!(
                k = trial.k,
                laplace = trial.laplace,
                spam_correct = trial.spam_correct,
                ham_correct = trial.ham_correct,
                "trial"
            );
        }

        let outcome = match select_best(&trials) {
            Some(best) => SearchOutcome {
                k: best.k,
                laplace: best.laplace,
                correct: best.correct(),
                model: self
                    .trainer(best.k, best.laplace)
                    .fit_counts(&counts, Priors::UNIFORM),
                trials,
            },
            None => SearchOutcome {
                k: 0,
                laplace: 0,
                correct: 0,
                model: Model::empty(Priors::UNIFORM, self.trainer(0, 0).hyperparameters()),
                trials,
            },
        };

        info!(
            k = outcome.k,
            laplace = outcome.laplace,
            correct = outcome.correct,
            out_of = 2 * count,
            "selected hyperparameters"
        );
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FeatureExtractor;

    fn emails(label: Label, texts: &[&str]) -> Vec<Email> {
        let extractor = FeatureExtractor::default();
        texts
            .iter()
            .enumerate()
            .map(|(i, text)| Email::new(label, format!("{label}-{i}"), *text, &extractor))
            .collect()
    }

    fn quiet(eval_emails_count: usize) -> SearchConfig {
        SearchConfig {
            eval_emails_count,
            progress: false,
            ..SearchConfig::default()
        }
    }

    fn corpus() -> LabeledCorpus<Email> {
        LabeledCorpus::new(
            emails(
                Label::Spam,
                &[
                    "cheap pills cheap",
                    "cheap pills now buy",
                    "buy cheap pills today",
                    "pills pills cheap offer",
                ],
            ),
            emails(
                Label::Ham,
                &[
                    "meeting agenda notes",
                    "agenda for the meeting",
                    "meeting notes attached",
                    "notes from agenda review",
                ],
            ),
        )
    }

    #[test]
    fn default_grid_bounds() {
        let config = SearchConfig::default();
        let ks = config.k.values();
        let laplaces = config.laplace.values();
        assert_eq!(ks.len(), 16);
        assert_eq!(ks.last(), Some(&75));
        assert_eq!(laplaces.len(), 15);
        assert_eq!(laplaces.last(), Some(&70));
        assert_eq!(GridSearch::new(config, 1).grid().len(), 240);
    }

    #[test]
    fn grid_walks_k_then_laplace() {
        let grid = GridSearch::new(SearchConfig::default(), 1).grid();
        assert_eq!(&grid[..3], &[(0, 0), (0, 5), (0, 10)]);
        assert_eq!(grid[15], (5, 0));
    }

    fn trial(k: usize, laplace: usize, spam_correct: usize, ham_correct: usize) -> Trial {
        Trial {
            k,
            laplace,
            spam_correct,
            ham_correct,
        }
    }

    #[test]
    fn ties_keep_first_trial() {
        let trials = [
            trial(0, 0, 1, 1),
            trial(0, 5, 2, 1),
            trial(5, 0, 1, 2),
            trial(5, 5, 0, 2),
        ];
        let best = select_best(&trials).unwrap();
        assert_eq!((best.k, best.laplace), (0, 5));
    }

    #[test]
    fn all_zero_trials_select_nothing() {
        assert!(select_best(&[trial(0, 0, 0, 0)]).is_none());
    }

    #[test]
    fn winning_model_matches_a_fresh_fit() {
        let corpus = corpus();
        let outcome = GridSearch::new(quiet(1), 1).run(&corpus).unwrap();
        let fresh = Trainer::new(outcome.model.hyperparameters()).fit(
            &corpus.spam[1..],
            &corpus.ham[1..],
            Priors::UNIFORM,
        );
        assert_eq!(outcome.model.likelihoods(), fresh.likelihoods());
    }

    #[test]
    fn first_perfect_pair_is_kept() {
        let outcome = GridSearch::new(quiet(1), 1).run(&corpus()).unwrap();
        assert_eq!(outcome.correct, 2);
        assert_eq!((outcome.k, outcome.laplace), (0, 0));
        assert_eq!(outcome.trials.len(), 240);
        assert_eq!(outcome.model.priors(), Priors::UNIFORM);
        assert_eq!(outcome.model.hyperparameters().k, 0);
    }

    #[test]
    fn parallel_sweep_matches_sequential() {
        let corpus = corpus();
        let sequential = GridSearch::new(quiet(1), 1).run(&corpus).unwrap();
        let parallel = GridSearch::new(
            SearchConfig {
                parallel: true,
                ..quiet(1)
            },
            1,
        )
        .run(&corpus)
        .unwrap();
        assert_eq!(sequential.trials, parallel.trials);
        assert_eq!((sequential.k, sequential.laplace), (parallel.k, parallel.laplace));
    }

    #[test]
    fn too_few_emails_to_hold_out() {
        let err = GridSearch::new(quiet(20), 1).run(&corpus()).unwrap_err();
        assert!(matches!(
            err,
            SpamFilterError::InsufficientEvaluationData {
                label: Label::Spam,
                needed: 20,
                available: 4
            }
        ));
    }

    #[test]
    fn zero_step_is_rejected() {
        let mut config = quiet(1);
        config.laplace.step = 0;
        assert!(matches!(
            GridSearch::new(config, 1).run(&corpus()),
            Err(SpamFilterError::InvalidConfig(_))
        ));
    }
}

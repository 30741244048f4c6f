use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::Email;
use crate::error::{Result, SpamFilterError};
use crate::generic_types::{Label, LabeledCorpus};

/// Vocabulary used by a model.
pub type FeatureSet = HashSet<String>;

/// Knobs for a single training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hyperparameters {
    /// A token joins the vocabulary when it occurs more than `k` times.
    pub k: usize,
    /// Laplace smoothing constant.
    pub laplace: usize,
    /// Width of the word n-grams used as features.
    pub ngram: usize,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            k: 3,
            laplace: 25,
            ngram: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Priors {
    pub spam: f64,
    pub ham: f64,
}
impl Priors {
    /// Used while searching hyperparameters so priors do not skew the comparison.
    pub const UNIFORM: Priors = Priors {
        spam: 0.5,
        ham: 0.5,
    };

    /// Empirical class frequencies of the training set.
    pub fn from_counts(spam: usize, ham: usize) -> Result<Self> {
        if spam == 0 || ham == 0 {
            return Err(SpamFilterError::EmptyTrainingSet);
        }
        let total = (spam + ham) as f64;
        Ok(Priors {
            spam: spam as f64 / total,
            ham: ham as f64 / total,
        })
    }

    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Spam => self.spam,
            Label::Ham => self.ham,
        }
    }
}

/// P(token | class) for both classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Likelihood {
    pub spam: f64,
    pub ham: f64,
}
impl Likelihood {
    pub fn get(&self, label: Label) -> f64 {
        match label {
            Label::Spam => self.spam,
            Label::Ham => self.ham,
        }
    }
}

/// Fitted parameters. Only tokens of the vocabulary it was trained on have a likelihood.
#[derive(Debug, Clone)]
pub struct Model {
    priors: Priors,
    likelihoods: HashMap<String, Likelihood>,
    hyperparameters: Hyperparameters,
}

impl Model {
    pub fn new(
        priors: Priors,
        likelihoods: HashMap<String, Likelihood>,
        hyperparameters: Hyperparameters,
    ) -> Self {
        Self {
            priors,
            likelihoods,
            hyperparameters,
        }
    }

    /// A model with no vocabulary; decisions fall back to the priors.
    pub fn empty(priors: Priors, hyperparameters: Hyperparameters) -> Self {
        Self::new(priors, HashMap::new(), hyperparameters)
    }

    pub fn priors(&self) -> Priors {
        self.priors
    }

    pub fn likelihood(&self, token: &str) -> Option<&Likelihood> {
        self.likelihoods.get(token)
    }

    pub fn likelihoods(&self) -> &HashMap<String, Likelihood> {
        &self.likelihoods
    }

    pub fn vocabulary_size(&self) -> usize {
        self.likelihoods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.likelihoods.is_empty()
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
    }
}

fn accumulate_counts(emails: &[Email], counts: &mut HashMap<String, usize>) {
    for email in emails {
        for (token, &count) in email.features() {
            *counts.entry(token.clone()).or_insert(0) += count;
        }
    }
}

/// Token totals of one class.
#[derive(Debug, Clone)]
struct ClassCounts {
    tokens: HashMap<String, usize>,
    total_words: usize,
}

impl ClassCounts {
    fn gather(emails: &[Email]) -> Self {
        let mut tokens = HashMap::new();
        accumulate_counts(emails, &mut tokens);
        let total_words = tokens.values().sum();
        Self { tokens, total_words }
    }

    fn count(&self, token: &str) -> usize {
        self.tokens.get(token).copied().unwrap_or(0)
    }

    /// Smoothed denominator: every word of the class plus `laplace` per vocabulary entry.
    fn denominator(&self, laplace: usize, vocabulary: usize) -> usize {
        self.total_words + laplace * vocabulary
    }
}

/// Token counts of a training set. Gathered once, then reused for any (k, laplace).
#[derive(Debug, Clone)]
pub struct TrainingCounts {
    combined: HashMap<String, usize>,
    spam: ClassCounts,
    ham: ClassCounts,
}

impl TrainingCounts {
    pub fn gather(spam: &[Email], ham: &[Email]) -> Self {
        let spam = ClassCounts::gather(spam);
        let ham = ClassCounts::gather(ham);
        let mut combined = spam.tokens.clone();
        for (token, &count) in &ham.tokens {
            *combined.entry(token.clone()).or_insert(0) += count;
        }
        Self { combined, spam, ham }
    }

    /// Every token whose combined count over both classes is strictly greater than `k`.
    pub fn features(&self, k: usize) -> FeatureSet {
        self.combined
            .iter()
            .filter(|&(_, &count)| count > k)
            .map(|(token, _)| token.clone())
            .collect()
    }

    /// Laplace-smoothed likelihoods for every token of `features`.
    pub fn likelihoods(
        &self,
        features: &FeatureSet,
        laplace: usize,
    ) -> HashMap<String, Likelihood> {
        let spam_denominator = self.spam.denominator(laplace, features.len()) as f64;
        let ham_denominator = self.ham.denominator(laplace, features.len()) as f64;

        features
            .iter()
            .map(|token| {
                let likelihood = Likelihood {
                    spam: (self.spam.count(token) + laplace) as f64 / spam_denominator,
                    ham: (self.ham.count(token) + laplace) as f64 / ham_denominator,
                };
                (token.clone(), likelihood)
            })
            .collect()
    }
}

/// One-off [`TrainingCounts::features`].
pub fn select_features(k: usize, spam: &[Email], ham: &[Email]) -> FeatureSet {
    TrainingCounts::gather(spam, ham).features(k)
}

/// One-off [`TrainingCounts::likelihoods`].
pub fn estimate_likelihoods(
    features: &FeatureSet,
    spam: &[Email],
    ham: &[Email],
    laplace: usize,
) -> HashMap<String, Likelihood> {
    TrainingCounts::gather(spam, ham).likelihoods(features, laplace)
}

/// Builds a vocabulary and fits a model on it.
#[derive(Debug, Clone, Copy)]
pub struct Trainer {
    hyperparameters: Hyperparameters,
}

impl Trainer {
    pub fn new(hyperparameters: Hyperparameters) -> Self {
        Self { hyperparameters }
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyperparameters
    }

    /// Train on the whole corpus with priors taken from the class sizes.
    pub fn train(&self, corpus: &LabeledCorpus<Email>) -> Result<Model> {
        let priors = Priors::from_counts(corpus.spam.len(), corpus.ham.len())?;
        Ok(self.fit(&corpus.spam, &corpus.ham, priors))
    }

    /// Train on the given emails with caller-supplied priors.
    pub fn fit(&self, spam: &[Email], ham: &[Email], priors: Priors) -> Model {
        self.fit_counts(&TrainingCounts::gather(spam, ham), priors)
    }

    /// Like [`Trainer::fit`], over counts gathered beforehand.
    pub fn fit_counts(&self, counts: &TrainingCounts, priors: Priors) -> Model {
        let Hyperparameters { k, laplace, .. } = self.hyperparameters;
        let features = counts.features(k);
        let likelihoods = counts.likelihoods(&features, laplace);
        debug!(
            k,
            laplace,
            vocabulary = likelihoods.len(),
            spam_words = counts.spam.total_words,
            ham_words = counts.ham.total_words,
            "fitted model"
        );
        Model::new(priors, likelihoods, self.hyperparameters)
    }
}

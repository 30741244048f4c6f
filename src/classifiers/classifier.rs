use crate::classifiers::naive_bayes::Model;
use crate::corpus::Email;
use crate::error::{Result, SpamFilterError};
use crate::generic_types::Label;

/// An email paired with the label the model gave it.
#[derive(Debug, Clone, Copy)]
pub struct Classified<'a> {
    pub email: &'a Email,
    pub predicted: Label,
}
impl Classified<'_> {
    pub fn is_correct(&self) -> bool {
        self.email.label() == self.predicted
    }
}

/// Log-space class scores for one email.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scores {
    pub spam: f64,
    pub ham: f64,
}
impl Scores {
    /// Spam only when it strictly wins; ties (and NaN) go to ham.
    pub fn decide(&self) -> Label {
        if self.spam > self.ham {
            Label::Spam
        } else {
            Label::Ham
        }
    }
}

/// log P(class) plus log P(token | class) for every token the model knows.
/// Tokens outside the vocabulary are skipped.
pub fn score(model: &Model, email: &Email) -> Scores {
    let priors = model.priors();
    let mut scores = Scores {
        spam: priors.spam.ln(),
        ham: priors.ham.ln(),
    };
    for token in email.features().keys() {
        if let Some(likelihood) = model.likelihood(token) {
            scores.spam += likelihood.spam.ln();
            scores.ham += likelihood.ham.ln();
        }
    }
    scores
}

/// MAP decision for a single email.
pub fn predict(model: &Model, email: &Email) -> Label {
    score(model, email).decide()
}

/// Applies a fitted model to emails.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    model: Option<Model>,
}

impl Classifier {
    pub fn new() -> Self {
        Self { model: None }
    }

    pub fn with_model(model: Model) -> Self {
        Self { model: Some(model) }
    }

    fn fitted(&self) -> Result<&Model> {
        self.model
            .as_ref()
            .ok_or(SpamFilterError::NotConfigured("no model has been set"))
    }

    pub fn classify_one(&self, email: &Email) -> Result<Label> {
        Ok(predict(self.fitted()?, email))
    }

    /// Classify every email, preserving order. The emails are left untouched.
    pub fn classify<'a>(&self, emails: &'a [Email]) -> Result<Vec<Classified<'a>>> {
        let model = self.fitted()?;
        Ok(emails
            .iter()
            .map(|email| Classified {
                email,
                predicted: predict(model, email),
            })
            .collect())
    }
}

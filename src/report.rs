//! Run summaries for the console.

use std::fmt::Write;

use serde::Serialize;

use crate::classifiers::{ClassSummary, ClassificationSummary, Hyperparameters};
use crate::corpus::Email;
use crate::generic_types::Label;
use crate::options::RunMode;

#[derive(Debug, Clone, Serialize)]
pub struct Example {
    pub source_id: String,
    pub text: String,
}
impl From<&Email> for Example {
    fn from(email: &Email) -> Self {
        Self {
            source_id: email.source_id().to_string(),
            text: email.raw_text().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClassReport {
    pub label: Label,
    pub correct: usize,
    pub total: usize,
    pub accuracy: f64,
    pub correct_example: Option<Example>,
    pub incorrect_example: Option<Example>,
}
impl From<&ClassSummary<'_>> for ClassReport {
    fn from(summary: &ClassSummary<'_>) -> Self {
        Self {
            label: summary.label(),
            correct: summary.correct_count(),
            total: summary.total(),
            accuracy: summary.accuracy(),
            correct_example: summary.first_correct().map(Example::from),
            incorrect_example: summary.first_incorrect().map(Example::from),
        }
    }
}

/// Everything printed for one training run.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: String,
    pub k: usize,
    pub laplace: usize,
    pub ngram: usize,
    pub vocabulary_size: usize,
    /// Held-out emails the selected pair got right; only for evaluated runs.
    pub held_out_correct: Option<usize>,
    pub ham: ClassReport,
    pub spam: ClassReport,
}

impl Report {
    pub fn new(
        mode: RunMode,
        hyperparameters: Hyperparameters,
        vocabulary_size: usize,
        summary: &ClassificationSummary<'_>,
    ) -> Self {
        Self {
            mode: mode.to_string(),
            k: hyperparameters.k,
            laplace: hyperparameters.laplace,
            ngram: hyperparameters.ngram,
            vocabulary_size,
            held_out_correct: None,
            ham: ClassReport::from(&summary.ham),
            spam: ClassReport::from(&summary.spam),
        }
    }

    pub fn with_held_out_correct(mut self, correct: usize) -> Self {
        self.held_out_correct = Some(correct);
        self
    }

    pub fn class(&self, label: Label) -> &ClassReport {
        match label {
            Label::Spam => &self.spam,
            Label::Ham => &self.ham,
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut String) -> std::fmt::Result {
        writeln!(out, "Training mode: {}", self.mode)?;
        writeln!(out, "The value K used in training is {}", self.k)?;
        writeln!(out, "The Laplace smoothing constant used in training is {}", self.laplace)?;
        writeln!(out, "N-gram width: {} ({} features)", self.ngram, self.vocabulary_size)?;
        if let Some(correct) = self.held_out_correct {
            writeln!(out, "Held-out emails classified correctly during search: {}", correct)?;
        }
        for label in [Label::Ham, Label::Spam] {
            let class = self.class(label);
            writeln!(
                out,
                "The number of {} emails that were classified correctly: {} of {}",
                label, class.correct, class.total
            )?;
        }
        for label in [Label::Ham, Label::Spam] {
            writeln!(
                out,
                "The accuracy of classifying {} is {}%",
                label,
                self.class(label).accuracy * 100.0
            )?;
        }
        for label in [Label::Ham, Label::Spam] {
            let class = self.class(label);
            writeln!(
                out,
                "An example of {} email that was classified correctly: {}",
                label,
                example_text(&class.correct_example)
            )?;
            writeln!(
                out,
                "An example of {} email that was classified incorrectly: {}",
                label,
                example_text(&class.incorrect_example)
            )?;
        }
        Ok(())
    }
}

fn example_text(example: &Option<Example>) -> &str {
    example.as_ref().map(|e| e.text.as_str()).unwrap_or("")
}

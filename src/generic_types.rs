use std::fmt;

use serde::{Deserialize, Serialize};

/// The two classes an email can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    Spam,
    Ham,
}
impl Label {
    pub fn to_str(&self) -> &str {
        match self {
            Label::Spam => "SPAM",
            Label::Ham => "HAM",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// Training documents split by class.
#[derive(Debug, Clone, Default)]
pub struct LabeledCorpus<T> {
    pub spam: Vec<T>,
    pub ham: Vec<T>,
}
impl<T> LabeledCorpus<T> {
    pub fn new(spam: Vec<T>, ham: Vec<T>) -> Self {
        Self { spam, ham }
    }

    pub fn get(&self, label: Label) -> &[T] {
        match label {
            Label::Spam => &self.spam,
            Label::Ham => &self.ham,
        }
    }

    pub fn len(&self) -> usize {
        self.spam.len() + self.ham.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spam.is_empty() && self.ham.is_empty()
    }
}

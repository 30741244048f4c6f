use crate::classifiers::classifier::Classified;
use crate::corpus::Email;
use crate::generic_types::Label;

/// Correct and incorrect predictions for emails of one true class.
#[derive(Debug, Clone)]
pub struct ClassSummary<'a> {
    label: Label,
    correct: Vec<&'a Email>,
    incorrect: Vec<&'a Email>,
}

impl<'a> ClassSummary<'a> {
    /// Partition `classified`, which should all carry `label` as their true class.
    pub fn from_classified(label: Label, classified: &[Classified<'a>]) -> Self {
        debug_assert!(
            classified.iter().all(|c| c.email.label() == label),
            "every email summarized as {label} must carry that label"
        );
        let (correct, incorrect): (Vec<&Classified<'a>>, Vec<&Classified<'a>>) =
            classified.iter().partition(|c| c.is_correct());
        Self {
            label,
            correct: correct.into_iter().map(|c| c.email).collect(),
            incorrect: incorrect.into_iter().map(|c| c.email).collect(),
        }
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn total(&self) -> usize {
        self.correct.len() + self.incorrect.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct.len()
    }

    /// Fraction predicted correctly; 0.0 when there is nothing to score.
    pub fn accuracy(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.correct.len() as f64 / total as f64,
        }
    }

    pub fn correct(&self) -> &[&'a Email] {
        &self.correct
    }

    pub fn incorrect(&self) -> &[&'a Email] {
        &self.incorrect
    }

    pub fn first_correct(&self) -> Option<&'a Email> {
        self.correct.first().copied()
    }

    pub fn first_incorrect(&self) -> Option<&'a Email> {
        self.incorrect.first().copied()
    }
}

/// Per-class summaries of one classification pass.
#[derive(Debug, Clone)]
pub struct ClassificationSummary<'a> {
    pub spam: ClassSummary<'a>,
    pub ham: ClassSummary<'a>,
}

impl<'a> ClassificationSummary<'a> {
    pub fn new(spam: &[Classified<'a>], ham: &[Classified<'a>]) -> Self {
        Self {
            spam: ClassSummary::from_classified(Label::Spam, spam),
            ham: ClassSummary::from_classified(Label::Ham, ham),
        }
    }

    pub fn get(&self, label: Label) -> &ClassSummary<'a> {
        match label {
            Label::Spam => &self.spam,
            Label::Ham => &self.ham,
        }
    }

    pub fn total_correct(&self) -> usize {
        self.spam.correct_count() + self.ham.correct_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FeatureExtractor;

    fn hams(n: usize) -> Vec<Email> {
        let extractor = FeatureExtractor::default();
        (0..n)
            .map(|i| Email::new(Label::Ham, format!("ham-{i}"), format!("message {i}"), &extractor))
            .collect()
    }

    fn predict_first_correct(emails: &[Email], correct: usize) -> Vec<Classified<'_>> {
        emails
            .iter()
            .enumerate()
            .map(|(i, email)| Classified {
                email,
                predicted: if i < correct { Label::Ham } else { Label::Spam },
            })
            .collect()
    }

    #[test]
    fn seven_of_ten_is_exactly_point_seven() {
        let emails = hams(10);
        let classified = predict_first_correct(&emails, 7);
        let summary = ClassSummary::from_classified(Label::Ham, &classified);
        assert_eq!(summary.correct_count(), 7);
        assert_eq!(summary.incorrect().len(), 3);
        assert_eq!(summary.accuracy(), 0.7);
    }

    #[test]
    fn examples_keep_input_order() {
        let emails = hams(4);
        let classified = predict_first_correct(&emails, 2);
        let summary = ClassSummary::from_classified(Label::Ham, &classified);
        assert_eq!(summary.first_correct().unwrap().source_id(), "ham-0");
        assert_eq!(summary.first_incorrect().unwrap().source_id(), "ham-2");
    }

    #[test]
    fn recomputing_is_idempotent() {
        let emails = hams(5);
        let classified = predict_first_correct(&emails, 3);
        let a = ClassSummary::from_classified(Label::Ham, &classified);
        let b = ClassSummary::from_classified(Label::Ham, &classified);
        assert_eq!(a.correct_count(), b.correct_count());
        assert_eq!(a.accuracy(), b.accuracy());
    }

    #[test]
    fn empty_class_scores_zero() {
        let summary = ClassSummary::from_classified(Label::Spam, &[]);
        assert_eq!(summary.accuracy(), 0.0);
        assert!(summary.first_correct().is_none());
        assert!(summary.first_incorrect().is_none());
    }

    #[test]
    fn partitions_correct_from_incorrect() {
        let emails = hams(3);
        let classified = predict_first_correct(&emails, 1);
        let summary = ClassSummary::from_classified(Label::Ham, &classified);
        let correct: Vec<&str> = summary.correct().iter().map(|e| e.source_id()).collect();
        let incorrect: Vec<&str> = summary.incorrect().iter().map(|e| e.source_id()).collect();
        assert_eq!(correct, vec!["ham-0"]);
        assert_eq!(incorrect, vec!["ham-1", "ham-2"]);
        assert_eq!(summary.label(), Label::Ham);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "must carry that label")]
    fn summarizing_under_the_wrong_label_panics() {
        let emails = hams(2);
        let classified = predict_first_correct(&emails, 2);
        ClassSummary::from_classified(Label::Spam, &classified);
    }

    #[test]
    fn totals_add_both_classes() {
        let emails = hams(3);
        let ham = predict_first_correct(&emails, 2);
        let summary = ClassificationSummary::new(&[], &ham);
        assert_eq!(summary.total_correct(), 2);
        assert_eq!(summary.get(Label::Ham).total(), 3);
        assert_eq!(summary.get(Label::Spam).total(), 0);
    }
}

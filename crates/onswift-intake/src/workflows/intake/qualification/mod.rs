mod policy;

pub use policy::{assess, auto_reject, QualificationDecision, RejectionReason};

use serde::Serialize;

use super::domain::{Application, ApplicationDraft, ExperienceBand};
use super::validation::rules::is_valid_url;
pub use super::validation::rules::word_count;

/// Encouragement threshold for the answer. Never blocks submission.
pub const THOUGHTFUL_ANSWER_WORDS: usize = 50;

/// Values the evaluator reads, available on drafts and frozen applications alike.
pub trait QualificationInput {
    fn portfolio(&self) -> &str;
    fn experience(&self) -> Option<ExperienceBand>;
    fn answer(&self) -> &str;
}

impl QualificationInput for ApplicationDraft {
    fn portfolio(&self) -> &str {
        &self.portfolio
    }

    fn experience(&self) -> Option<ExperienceBand> {
        self.experience
    }

    fn answer(&self) -> &str {
        &self.why_on_swift
    }
}

impl QualificationInput for Application {
    fn portfolio(&self) -> &str {
        &self.portfolio
    }

    fn experience(&self) -> Option<ExperienceBand> {
        Some(self.experience)
    }

    fn answer(&self) -> &str {
        &self.why_on_swift
    }
}

/// Live pass-criteria flags shown above the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QualificationSignal {
    pub has_portfolio: bool,
    pub has_experience: bool,
    pub has_thoughtful_answer: bool,
    pub word_count: usize,
}

impl QualificationSignal {
    pub fn criteria(&self) -> [PassCriterion; 3] {
        [
            PassCriterion {
                label: "Portfolio link provided",
                met: self.has_portfolio,
            },
            PassCriterion {
                label: "3+ years of experience",
                met: self.has_experience,
            },
            PassCriterion {
                label: "Thoughtful response (50+ words)",
                met: self.has_thoughtful_answer,
            },
        ]
    }

    pub fn met_count(&self) -> usize {
        self.criteria().iter().filter(|criterion| criterion.met).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassCriterion {
    pub label: &'static str,
    pub met: bool,
}

/// Compute the pass criteria from whatever the applicant has entered so far.
pub fn pass_criteria<I: QualificationInput + ?Sized>(input: &I) -> QualificationSignal {
    let portfolio = input.portfolio();
    let words = word_count(input.answer());

    QualificationSignal {
        has_portfolio: !portfolio.is_empty() && is_valid_url(portfolio),
        has_experience: input
            .experience()
            .map(ExperienceBand::is_seasoned)
            .unwrap_or(false),
        has_thoughtful_answer: words >= THOUGHTFUL_ANSWER_WORDS,
        word_count: words,
    }
}

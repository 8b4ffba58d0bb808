use serde::Serialize;

use super::super::domain::ExperienceBand;
use super::super::validation::rules::{word_count, MIN_ANSWER_WORDS};
use super::QualificationInput;

/// Hard gate applied to the submitted values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "decision")]
pub enum QualificationDecision {
    Qualified,
    AutoRejected { reasons: Vec<RejectionReason> },
}

impl QualificationDecision {
    pub fn is_auto_reject(&self) -> bool {
        matches!(self, Self::AutoRejected { .. })
    }

    pub fn reasons(&self) -> &[RejectionReason] {
        match self {
            Self::Qualified => &[],
            Self::AutoRejected { reasons } => reasons,
        }
    }

    pub fn summary(&self) -> String {
        match self {
            Self::Qualified => "meets qualification gate".to_string(),
            Self::AutoRejected { reasons } => {
                let details: Vec<String> = reasons.iter().map(RejectionReason::summary).collect();
                format!("auto-rejected: {}", details.join("; "))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    MissingPortfolio,
    InsufficientExperience,
    AnswerTooShort { words: usize },
}

impl RejectionReason {
    pub fn summary(&self) -> String {
        match self {
            Self::MissingPortfolio => "no portfolio link".to_string(),
            Self::InsufficientExperience => "less than 3 years of experience".to_string(),
            Self::AnswerTooShort { words } => {
                format!("answer has {words} word(s), minimum {MIN_ANSWER_WORDS}")
            }
        }
    }
}

/// Evaluate every gate, collecting each one that fails.
pub fn assess<I: QualificationInput + ?Sized>(input: &I) -> QualificationDecision {
    let mut reasons = Vec::new();

    if input.portfolio().is_empty() {
        reasons.push(RejectionReason::MissingPortfolio);
    }

    if input.experience() == Some(ExperienceBand::ZeroToTwo) {
        reasons.push(RejectionReason::InsufficientExperience);
    }

    let words = word_count(input.answer());
    if words < MIN_ANSWER_WORDS {
        reasons.push(RejectionReason::AnswerTooShort { words });
    }

    if reasons.is_empty() {
        QualificationDecision::Qualified
    } else {
        QualificationDecision::AutoRejected { reasons }
    }
}

pub fn auto_reject<I: QualificationInput + ?Sized>(input: &I) -> bool {
    assess(input).is_auto_reject()
}

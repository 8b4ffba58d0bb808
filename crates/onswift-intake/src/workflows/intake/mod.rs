//! Freelancer application intake: field validation, qualification, and submission.
//!
//! The validator and the qualification evaluator are pure functions over an
//! [`ApplicationDraft`]. Callers re-run them after every input change;
//! [`IntakeSession`] bundles them with the single outbound submission.

pub mod domain;
pub mod gateway;
pub mod payload;
pub mod qualification;
pub mod router;
pub mod session;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{
    Application, ApplicationDraft, Availability, Category, Choice, ChoiceOption, ExperienceBand,
    Field, HourlyRate, UnknownOption,
};
pub use gateway::{
    applications_endpoint, ApplicationGateway, HttpApplicationGateway, TransportError,
    APPLICATIONS_PATH,
};
pub use payload::ApplicationPayload;
pub use qualification::{
    assess, auto_reject, pass_criteria, word_count, PassCriterion, QualificationDecision,
    QualificationInput, QualificationSignal, RejectionReason, THOUGHTFUL_ANSWER_WORDS,
};
pub use router::{intake_router, DraftCheckView, IntakeState, SelectView, SubmissionView};
pub use session::{IntakeSession, ResetPolicy, SubmissionReport, SubmitError, SubmitResult};
pub use validation::rules::{
    char_len, MAX_ANSWER_CHARS, MAX_PROJECT_CHARS, MIN_ANSWER_WORDS, MIN_NAME_CHARS,
    MIN_PHONE_CHARS, MIN_PROJECT_CHARS,
};
pub use validation::{validate, validate_field, validate_for_submission, FieldErrors, FieldViolation};

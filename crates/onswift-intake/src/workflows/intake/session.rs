use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::domain::{ApplicationDraft, Choice, Field, UnknownOption};
use super::gateway::{ApplicationGateway, TransportError};
use super::payload::ApplicationPayload;
use super::qualification::{self, QualificationDecision, QualificationSignal};
use super::validation::{self, FieldErrors, FieldViolation};

/// Terminal state of the form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitResult {
    #[default]
    #[serde(rename = "none")]
    NotSubmitted,
    Success,
    Rejected,
}

impl SubmitResult {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NotSubmitted => "none",
            Self::Success => "success",
            Self::Rejected => "rejected",
        }
    }
}

/// What "return to form" does with the values already entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    #[default]
    PreserveFields,
    ClearFields,
}

impl FromStr for ResetPolicy {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "preserve" | "keep" => Ok(Self::PreserveFields),
            "clear" | "reset" => Ok(Self::ClearFields),
            other => Err(other.to_string()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("submission blocked: {0}")]
    Blocked(FieldErrors),
    #[error("a submission is already in flight")]
    InFlight,
}

/// Everything known once a submission attempt finishes.
#[derive(Debug)]
pub struct SubmissionReport {
    pub result: SubmitResult,
    pub decision: QualificationDecision,
    /// Kept for logs only; the applicant sees the same rejection either way.
    pub transport_error: Option<TransportError>,
    pub completed_at: DateTime<Utc>,
}

/// Holds the submitting flag high for as long as it lives.
struct SubmittingGuard {
    flag: Arc<AtomicBool>,
}

impl SubmittingGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for SubmittingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// One applicant's pass through the form: the draft, its submitting state, and the
/// terminal result.
pub struct IntakeSession<G: ?Sized> {
    draft: ApplicationDraft,
    result: SubmitResult,
    submitting: Arc<AtomicBool>,
    gateway: Arc<G>,
    reset_policy: ResetPolicy,
}

impl<G> IntakeSession<G>
where
    G: ApplicationGateway + ?Sized,
{
    pub fn new(gateway: Arc<G>) -> Self {
        Self::with_draft(gateway, ApplicationDraft::default())
    }

    pub fn with_draft(gateway: Arc<G>, draft: ApplicationDraft) -> Self {
        Self {
            draft,
            result: SubmitResult::NotSubmitted,
            submitting: Arc::new(AtomicBool::new(false)),
            gateway,
            reset_policy: ResetPolicy::default(),
        }
    }

    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    /// Share a submitting flag with another owner, such as a UI that disables its button.
    pub fn with_submitting_handle(mut self, handle: Arc<AtomicBool>) -> Self {
        self.submitting = handle;
        self
    }

    pub fn draft(&self) -> &ApplicationDraft {
        &self.draft
    }

    /// Apply one input change and re-check that field.
    pub fn update(
        &mut self,
        field: Field,
        value: &str,
    ) -> Result<Option<FieldViolation>, UnknownOption> {
        self.draft.set(field, value)?;
        Ok(validation::validate_field(&self.draft, field))
    }

    pub fn errors(&self) -> FieldErrors {
        validation::validate(&self.draft)
    }

    pub fn field_error(&self, field: Field) -> Option<FieldViolation> {
        validation::validate_field(&self.draft, field)
    }

    pub fn pass_criteria(&self) -> QualificationSignal {
        qualification::pass_criteria(&self.draft)
    }

    pub fn word_count(&self) -> usize {
        qualification::word_count(&self.draft.why_on_swift)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub fn submitting_handle(&self) -> Arc<AtomicBool> {
        self.submitting.clone()
    }

    pub fn result(&self) -> SubmitResult {
        self.result
    }

    pub fn reset_policy(&self) -> ResetPolicy {
        self.reset_policy
    }

    /// Validate, post the payload once, and settle on a terminal result.
    ///
    /// Field errors abort before any network call. Any transport failure resolves to
    /// [`SubmitResult::Rejected`]; a delivered application is rejected only when it fails
    /// the qualification gate.
    pub async fn submit(&mut self) -> Result<SubmissionReport, SubmitError> {
        let application = match validation::validate_for_submission(&self.draft) {
            Ok(application) => application,
            Err(errors) => {
                warn!(invalid_fields = errors.len(), "submission blocked by field validation");
                return Err(SubmitError::Blocked(errors));
            }
        };

        let Some(_guard) = SubmittingGuard::acquire(&self.submitting) else {
            return Err(SubmitError::InFlight);
        };
        self.result = SubmitResult::NotSubmitted;

        let payload = ApplicationPayload::from(&application);
        info!(
            category = application.category().code(),
            experience = application.experience().code(),
            "submitting application"
        );

        let delivery = self.gateway.submit(&payload).await;
        let decision = qualification::assess(&application);

        let (result, transport_error) = match delivery {
            Ok(_) if decision.is_auto_reject() => (SubmitResult::Rejected, None),
            Ok(_) => (SubmitResult::Success, None),
            Err(err) => {
                warn!(error = %err, "application submission failed");
                (SubmitResult::Rejected, Some(err))
            }
        };

        self.result = result;
        info!(
            result = result.label(),
            decision = %decision.summary(),
            "application submission finished"
        );

        Ok(SubmissionReport {
            result,
            decision,
            transport_error,
            completed_at: Utc::now(),
        })
    }

    /// Leave the terminal screen and go back to editing.
    pub fn return_to_form(&mut self) {
        self.result = SubmitResult::NotSubmitted;
        if self.reset_policy == ResetPolicy::ClearFields {
            self.draft = ApplicationDraft::default();
        }
    }
}

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::domain::{ApplicationDraft, ChoiceOption, Field};
use super::gateway::ApplicationGateway;
use super::qualification::{self, PassCriterion, QualificationSignal};
use super::session::{IntakeSession, ResetPolicy, SubmitError, SubmitResult};
use super::validation::{self, FieldErrors};

/// Shared by every request: the backend gateway, the reset policy, and the submitting
/// flag that keeps one application in flight at a time.
pub struct IntakeState<G: ?Sized> {
    gateway: Arc<G>,
    reset_policy: ResetPolicy,
    submitting: Arc<AtomicBool>,
}

impl<G: ?Sized> Clone for IntakeState<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: self.gateway.clone(),
            reset_policy: self.reset_policy,
            submitting: self.submitting.clone(),
        }
    }
}

impl<G: ?Sized> IntakeState<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        Self {
            gateway,
            reset_policy: ResetPolicy::default(),
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_reset_policy(mut self, reset_policy: ResetPolicy) -> Self {
        self.reset_policy = reset_policy;
        self
    }

    pub fn with_submitting_handle(mut self, handle: Arc<AtomicBool>) -> Self {
        self.submitting = handle;
        self
    }

    pub fn submitting_handle(&self) -> Arc<AtomicBool> {
        self.submitting.clone()
    }
}

/// A select input and its options.
#[derive(Debug, Serialize)]
pub struct SelectView {
    pub field: Field,
    pub options: Vec<ChoiceOption>,
}

/// Live feedback for the form after an input change.
#[derive(Debug, Serialize)]
pub struct DraftCheckView {
    pub errors: FieldErrors,
    pub pass_criteria: QualificationSignal,
    pub criteria: [PassCriterion; 3],
    pub selects: Vec<SelectView>,
    pub can_submit: bool,
}

impl DraftCheckView {
    pub fn from_draft(draft: &ApplicationDraft) -> Self {
        let errors = validation::validate(draft);
        let pass_criteria = qualification::pass_criteria(draft);
        let selects = Field::ordered()
            .into_iter()
            .filter(|field| field.is_choice())
            .map(|field| SelectView {
                field,
                options: draft.options(field),
            })
            .collect();
        Self {
            can_submit: errors.is_empty(),
            criteria: pass_criteria.criteria(),
            pass_criteria,
            selects,
            errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SubmissionView {
    pub result: SubmitResult,
    pub auto_rejected: bool,
    pub reasons: Vec<String>,
    /// Form contents after leaving the terminal screen.
    pub form: ApplicationDraft,
}

/// Router builder exposing the intake engine to a presentation layer.
pub fn intake_router<G>(state: IntakeState<G>) -> Router
where
    G: ApplicationGateway + ?Sized + 'static,
{
    Router::new()
        .route("/api/v1/intake/check", post(check_handler))
        .route("/api/v1/intake/submit", post(submit_handler::<G>))
        .with_state(state)
}

pub(crate) async fn check_handler(Json(draft): Json<ApplicationDraft>) -> Json<DraftCheckView> {
    let view = DraftCheckView::from_draft(&draft);
    debug!(
        invalid_fields = view.errors.len(),
        can_submit = view.can_submit,
        "draft checked"
    );
    Json(view)
}

pub(crate) async fn submit_handler<G>(
    State(state): State<IntakeState<G>>,
    Json(draft): Json<ApplicationDraft>,
) -> Response
where
    G: ApplicationGateway + ?Sized + 'static,
{
    let mut session = IntakeSession::with_draft(state.gateway, draft)
        .with_reset_policy(state.reset_policy)
        .with_submitting_handle(state.submitting);

    match session.submit().await {
        Ok(report) => {
            session.return_to_form();
            let view = SubmissionView {
                result: report.result,
                auto_rejected: report.decision.is_auto_reject(),
                reasons: report
                    .decision
                    .reasons()
                    .iter()
                    .map(|reason| reason.summary())
                    .collect(),
                form: session.draft().clone(),
            };
            (StatusCode::OK, Json(view)).into_response()
        }
        Err(SubmitError::Blocked(errors)) => {
            let payload = json!({ "errors": errors });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
        Err(SubmitError::InFlight) => {
            let payload = json!({ "error": SubmitError::InFlight.to_string() });
            (StatusCode::CONFLICT, Json(payload)).into_response()
        }
    }
}

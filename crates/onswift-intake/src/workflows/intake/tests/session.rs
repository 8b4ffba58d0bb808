use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::common::*;
use crate::workflows::intake::domain::{ApplicationDraft, Category, ExperienceBand, Field};
use crate::workflows::intake::gateway::{ApplicationGateway, TransportError};
use crate::workflows::intake::qualification::RejectionReason;
use crate::workflows::intake::session::{IntakeSession, ResetPolicy, SubmitError, SubmitResult};
use crate::workflows::intake::validation::FieldViolation;

#[tokio::test]
async fn qualifying_application_ends_in_success() {
    let gateway = RecordingGateway::accepting();
    let mut session = IntakeSession::with_draft(gateway.clone(), valid_draft());

    let report = session.submit().await.expect("submission runs");

    assert_eq!(report.result, SubmitResult::Success);
    assert!(!report.decision.is_auto_reject());
    assert!(report.transport_error.is_none());
    assert_eq!(session.result(), SubmitResult::Success);
    assert!(!session.is_submitting());

    let payloads = gateway.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0].experience, ExperienceBand::TenPlus);
    assert_eq!(payloads[0].portfolio, PORTFOLIO);
}

#[tokio::test]
async fn junior_applicant_is_rejected_after_delivery() {
    let gateway = RecordingGateway::accepting();
    let mut session = IntakeSession::with_draft(gateway.clone(), junior_draft());

    let report = session.submit().await.expect("submission runs");

    assert_eq!(report.result, SubmitResult::Rejected);
    assert_eq!(
        report.decision.reasons(),
        [RejectionReason::InsufficientExperience]
    );
    assert!(report.transport_error.is_none());
    assert_eq!(gateway.calls(), 1, "payload still delivered");
}

#[tokio::test]
async fn transport_failures_look_like_rejections() {
    for reply in [Reply::Status(500), Reply::Status(404), Reply::Unreachable, Reply::Garbled] {
        let gateway = Arc::new(RecordingGateway::new(reply));
        let mut session = IntakeSession::with_draft(gateway.clone(), valid_draft());

        let report = session.submit().await.expect("submission runs");

        assert_eq!(report.result, SubmitResult::Rejected, "{reply:?}");
        assert!(!report.decision.is_auto_reject(), "{reply:?}");
        assert!(report.transport_error.is_some(), "{reply:?}");
        assert_eq!(session.result(), SubmitResult::Rejected);
        assert!(!session.is_submitting());
        assert_eq!(gateway.calls(), 1);
    }
}

#[tokio::test]
async fn server_error_status_is_kept_for_logs() {
    let gateway = Arc::new(RecordingGateway::new(Reply::Status(502)));
    let mut session = IntakeSession::with_draft(gateway, valid_draft());

    let report = session.submit().await.expect("submission runs");

    match report.transport_error {
        Some(TransportError::Status { status }) => assert_eq!(status, 502),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_network() {
    let gateway = RecordingGateway::accepting();
    let mut draft = valid_draft();
    draft.email = "ada-at-example".to_string();
    draft.project3 = "x".repeat(101);
    let mut session = IntakeSession::with_draft(gateway.clone(), draft);

    match session.submit().await {
        Err(SubmitError::Blocked(errors)) => {
            assert_eq!(errors.len(), 2);
            assert_eq!(errors.get(Field::Email), Some(FieldViolation::InvalidEmail));
            assert_eq!(
                errors.get(Field::Project3),
                Some(FieldViolation::ProjectTooLong)
            );
        }
        other => panic!("expected blocked submission, got {other:?}"),
    }

    assert_eq!(gateway.calls(), 0);
    assert_eq!(session.result(), SubmitResult::NotSubmitted);
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn outstanding_submission_gates_another() {
    let gateway = RecordingGateway::accepting();
    let handle = Arc::new(AtomicBool::new(true));
    let mut session = IntakeSession::with_draft(gateway.clone(), valid_draft())
        .with_submitting_handle(handle.clone());

    match session.submit().await {
        Err(SubmitError::InFlight) => {}
        other => panic!("expected in-flight error, got {other:?}"),
    }

    assert_eq!(gateway.calls(), 0);
    assert!(handle.load(Ordering::Acquire), "foreign flag left untouched");
}

#[tokio::test]
async fn submitting_flag_is_raised_only_during_the_call() {
    let handle = Arc::new(AtomicBool::new(false));
    let watcher = Arc::new(FlagWatchGateway::new(handle.clone()));
    let gateway: Arc<dyn ApplicationGateway> = watcher.clone();
    let mut session =
        IntakeSession::with_draft(gateway, valid_draft()).with_submitting_handle(handle.clone());

    assert!(!session.is_submitting());
    let report = session.submit().await.expect("submission runs");

    assert_eq!(watcher.observed(), Some(true));
    assert_eq!(report.result, SubmitResult::Rejected);
    assert!(!handle.load(Ordering::Acquire));
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn return_to_form_preserves_fields_by_default() {
    let mut session = IntakeSession::with_draft(RecordingGateway::accepting(), junior_draft());
    assert_eq!(session.reset_policy(), ResetPolicy::PreserveFields);

    session.submit().await.expect("submission runs");
    assert_eq!(session.result(), SubmitResult::Rejected);

    session.return_to_form();

    assert_eq!(session.result(), SubmitResult::NotSubmitted);
    assert_eq!(session.draft(), &junior_draft());
}

#[tokio::test]
async fn return_to_form_can_clear_fields() {
    let mut session = IntakeSession::with_draft(RecordingGateway::accepting(), valid_draft())
        .with_reset_policy(ResetPolicy::ClearFields);

    session.submit().await.expect("submission runs");
    assert_eq!(session.result(), SubmitResult::Success);

    session.return_to_form();

    assert_eq!(session.result(), SubmitResult::NotSubmitted);
    assert_eq!(session.draft(), &ApplicationDraft::default());
}

#[test]
fn updates_revalidate_the_changed_field() {
    let mut session = IntakeSession::new(RecordingGateway::accepting());

    let violation = session
        .update(Field::FullName, "A")
        .expect("text field accepts any value");
    assert_eq!(violation, Some(FieldViolation::NameTooShort));

    let violation = session
        .update(Field::Category, "ui-ux")
        .expect("known category");
    assert_eq!(violation, None);
    assert_eq!(session.draft().category, Some(Category::UiUx));

    let violation = session.update(Field::Category, "").expect("clearing a select");
    assert_eq!(violation, Some(FieldViolation::CategoryRequired));
    assert_eq!(session.draft().category, None);
}

#[test]
fn unknown_option_codes_are_refused() {
    let mut session = IntakeSession::new(RecordingGateway::accepting());

    let err = session
        .update(Field::HourlyRate, "500+")
        .expect_err("unknown band");
    assert_eq!(err.field, Field::HourlyRate);
    assert_eq!(err.value, "500+");
    assert_eq!(session.draft().hourly_rate, None);
}

#[test]
fn live_feedback_tracks_the_draft() {
    let mut session = IntakeSession::new(RecordingGateway::accepting());
    assert_eq!(session.word_count(), 0);
    assert_eq!(session.pass_criteria().met_count(), 0);

    session
        .update(Field::WhyOnSwift, &words(55))
        .expect("text field");
    session.update(Field::Experience, "6-10").expect("band");
    session.update(Field::Portfolio, PORTFOLIO).expect("text field");

    let signal = session.pass_criteria();
    assert_eq!(session.word_count(), 55);
    assert!(signal.has_portfolio && signal.has_experience && signal.has_thoughtful_answer);
    assert_eq!(session.errors(), session.errors());
    assert_eq!(session.field_error(Field::WhyOnSwift), None);
}

use metrics_exporter_prometheus::PrometheusHandle;
use onswift_intake::error::AppError;
use onswift_intake::workflows::intake::ApplicationDraft;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load a camelCase application draft from disk. Missing fields stay empty.
pub(crate) fn read_draft(path: &Path) -> Result<ApplicationDraft, AppError> {
    let raw = fs::read_to_string(path)?;
    let draft = serde_json::from_str(&raw)?;
    Ok(draft)
}

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::{json, Value};

use crate::workflows::intake::domain::{
    ApplicationDraft, Availability, Category, ExperienceBand, HourlyRate,
};
use crate::workflows::intake::gateway::{ApplicationGateway, TransportError};
use crate::workflows::intake::payload::ApplicationPayload;

pub(super) const PORTFOLIO: &str = "https://x.com";

/// `count` distinct whitespace-separated words.
pub(super) fn words(count: usize) -> String {
    (0..count)
        .map(|index| format!("word{index}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub(super) fn valid_draft() -> ApplicationDraft {
    ApplicationDraft {
        full_name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        category: Some(Category::FrontendDev),
        experience: Some(ExperienceBand::TenPlus),
        portfolio: PORTFOLIO.to_string(),
        project1: "Analytics dashboard for a fintech startup".to_string(),
        project2: "Design system rollout across four product teams".to_string(),
        project3: "Checkout rewrite that lifted conversion by 12%".to_string(),
        hourly_rate: Some(HourlyRate::FiftyToEighty),
        availability: Some(Availability::ThirtyToForty),
        why_on_swift: words(60),
    }
}

pub(super) fn junior_draft() -> ApplicationDraft {
    let mut draft = valid_draft();
    draft.experience = Some(ExperienceBand::ZeroToTwo);
    draft
}

#[derive(Debug, Clone, Copy)]
pub(super) enum Reply {
    Accepted,
    Status(u16),
    Unreachable,
    Garbled,
}

/// Records every payload and answers with a canned reply.
#[derive(Debug)]
pub(super) struct RecordingGateway {
    reply: Reply,
    payloads: Mutex<Vec<ApplicationPayload>>,
}

impl RecordingGateway {
    pub(super) fn new(reply: Reply) -> Self {
        Self {
            reply,
            payloads: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn accepting() -> Arc<Self> {
        Arc::new(Self::new(Reply::Accepted))
    }

    pub(super) fn payloads(&self) -> Vec<ApplicationPayload> {
        self.payloads.lock().expect("payload mutex poisoned").clone()
    }

    pub(super) fn calls(&self) -> usize {
        self.payloads.lock().expect("payload mutex poisoned").len()
    }
}

#[async_trait]
impl ApplicationGateway for RecordingGateway {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<Value, TransportError> {
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(payload.clone());

        match self.reply {
            Reply::Accepted => Ok(json!({ "id": 42, "status": "received" })),
            Reply::Status(status) => Err(TransportError::Status { status }),
            Reply::Unreachable => Err(TransportError::Request {
                endpoint: "http://127.0.0.1:9/api/applications/".to_string(),
                message: "connection refused".to_string(),
            }),
            Reply::Garbled => Err(TransportError::Decode("expected value at line 1".to_string())),
        }
    }
}

/// Captures the submitting flag as seen from inside the network call.
#[derive(Debug)]
pub(super) struct FlagWatchGateway {
    pub(super) flag: Arc<AtomicBool>,
    pub(super) observed: Mutex<Option<bool>>,
}

impl FlagWatchGateway {
    pub(super) fn new(flag: Arc<AtomicBool>) -> Self {
        Self {
            flag,
            observed: Mutex::new(None),
        }
    }

    pub(super) fn observed(&self) -> Option<bool> {
        *self.observed.lock().expect("watch mutex poisoned")
    }
}

#[async_trait]
impl ApplicationGateway for FlagWatchGateway {
    async fn submit(&self, _payload: &ApplicationPayload) -> Result<Value, TransportError> {
        *self.observed.lock().expect("watch mutex poisoned") =
            Some(self.flag.load(Ordering::Acquire));
        Err(TransportError::Status { status: 503 })
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use super::payload::ApplicationPayload;

/// Fixed path of the applications endpoint, joined onto the configured base URL.
pub const APPLICATIONS_PATH: &str = "/api/applications/";

/// Ways a submission can fail in transit. All of them end on the rejection screen.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("request to {endpoint} failed: {message}")]
    Request { endpoint: String, message: String },
    #[error("backend responded with HTTP {status}")]
    Status { status: u16 },
    #[error("backend response was not valid JSON: {0}")]
    Decode(String),
}

/// Outbound seam to the applications backend.
#[async_trait]
pub trait ApplicationGateway: Send + Sync {
    /// Deliver one payload, returning the backend's JSON body on a 2xx response.
    async fn submit(&self, payload: &ApplicationPayload) -> Result<Value, TransportError>;
}

pub fn applications_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), APPLICATIONS_PATH)
}

/// reqwest-backed gateway issuing a single JSON POST per submission.
#[derive(Debug, Clone)]
pub struct HttpApplicationGateway {
    client: Client,
    endpoint: String,
}

impl HttpApplicationGateway {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let endpoint = applications_endpoint(base_url);
        let client = Client::builder()
            .build()
            .map_err(|err| TransportError::Request {
                endpoint: endpoint.clone(),
                message: err.to_string(),
            })?;
        Ok(Self { client, endpoint })
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: applications_endpoint(base_url),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_error(&self, err: reqwest::Error) -> TransportError {
        TransportError::Request {
            endpoint: self.endpoint.clone(),
            message: err.to_string(),
        }
    }
}

#[async_trait]
impl ApplicationGateway for HttpApplicationGateway {
    async fn submit(&self, payload: &ApplicationPayload) -> Result<Value, TransportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|err| self.request_error(err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .json::<Value>()
            .await
            .map_err(|err| TransportError::Decode(err.to_string()))?;
        debug!(endpoint = %self.endpoint, %status, "application accepted by backend");
        Ok(body)
    }
}

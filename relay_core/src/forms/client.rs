//! HTTP client side of the relay contract

use crate::models::Inquiry;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("network error: {0}")]
    Network(String),

    #[error("relay responded with status {status}")]
    Rejected { status: u16 },
}

#[async_trait]
pub trait RelayClient: Send + Sync {
    /// Exactly one POST per call. No retries.
    async fn post_inquiry(&self, inquiry: &Inquiry) -> Result<(), SubmitError>;
}

#[derive(Clone)]
pub struct HttpRelayClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRelayClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RelayClient for HttpRelayClient {
    async fn post_inquiry(&self, inquiry: &Inquiry) -> Result<(), SubmitError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(inquiry)
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SubmitError::Rejected {
                status: status.as_u16(),
            })
        }
    }
}

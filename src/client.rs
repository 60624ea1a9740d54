use crate::config::ApiConfig;
use crate::error::AppError;
use crate::logging::{truncate_body, SensitiveToken};
use crate::submission::CreateEstimateRequest;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

/// Longest backend error body kept in an [`AppError::Upstream`] message
const MAX_ERROR_BODY: usize = 2048;

/// Identifier the backend assigns to a created estimate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EstimateId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EstimateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// What the backend returns after creating an estimate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateReceipt {
    #[serde(default)]
    pub id: Option<EstimateId>,
    #[serde(default)]
    pub estimate_number: Option<String>,
}

impl EstimateReceipt {
    /// Reference for the confirmation message: the estimate number, else the id
    pub fn reference(&self) -> Option<String> {
        self.estimate_number
            .clone()
            .or_else(|| self.id.as_ref().map(|id| id.to_string()))
    }
}

/// The backend may answer with the receipt itself or wrap it in `data`
#[derive(Deserialize)]
#[serde(untagged)]
enum ReceiptEnvelope {
    Wrapped { data: EstimateReceipt },
    Bare(EstimateReceipt),
}

impl ReceiptEnvelope {
    fn into_receipt(self) -> EstimateReceipt {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(receipt) => receipt,
        }
    }
}

fn parse_receipt(status: reqwest::StatusCode, body: &str) -> EstimateReceipt {
    match serde_json::from_str::<ReceiptEnvelope>(body) {
        Ok(envelope) => envelope.into_receipt(),
        Err(e) => {
            let (snippet, _) = truncate_body(body.to_string(), MAX_ERROR_BODY);
            warn!(
                status = %status,
                error = %e,
                body = %snippet,
                "Estimate created but response has no readable receipt"
            );
            EstimateReceipt::default()
        }
    }
}

/// Backend collaborator that owns durable estimate storage
#[async_trait]
pub trait EstimateApi: Send + Sync {
    async fn create_estimate(
        &self,
        request: &CreateEstimateRequest,
    ) -> Result<EstimateReceipt, AppError>;
}

/// reqwest-backed [`EstimateApi`] talking to the REST backend
pub struct HttpEstimateClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpEstimateClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(concat!("sales-estimator/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    pub fn estimates_url(&self) -> String {
        format!("{}/estimates", self.base_url)
    }
}

#[async_trait]
impl EstimateApi for HttpEstimateClient {
    async fn create_estimate(
        &self,
        request: &CreateEstimateRequest,
    ) -> Result<EstimateReceipt, AppError> {
        let url = self.estimates_url();

        let mut req = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout);

        if let Some(token) = &self.token {
            debug!(token = %SensitiveToken::new(token), "Using bearer token");
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        debug!(url = %url, "POST estimate");
        let response = req.json(request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let (message, _) = truncate_body(error_text, MAX_ERROR_BODY);
            return Err(AppError::Upstream { status, message });
        }

        // The estimate exists once the backend answers 2xx; an unreadable
        // body only costs us the confirmation reference.
        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(status = %status, error = %e, "Estimate created but response body unreadable");
                return Ok(EstimateReceipt::default());
            }
        };
        Ok(parse_receipt(status, &body))
    }
}

//! Carrying a submission from the client to the proxy.

use std::future::Future;

use cfp_core::footprint::FootprintResult;
use cfp_core::lifestyle::LifestyleInput;
use cfp_core::wire::{ErrorBody, EstimateRequest};
use log::{debug, info};
use reqwest::{Client, StatusCode};
use thiserror::Error;

pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:8787/";

#[derive(Error, Debug)]
pub enum ClientError {
    /// The proxy answered with its uniform error body
    #[error("{}", .body.error)]
    Rejected { status: u16, body: ErrorBody },

    #[error("Could not reach the estimation service: {0}")]
    Unreachable(#[from] reqwest::Error),

    #[error("Unexpected response from the estimation service: {0}")]
    Decode(String),
}

/// One estimation round-trip.
pub trait EstimateTransport {
    fn submit(
        &self,
        input: &LifestyleInput,
    ) -> impl Future<Output = Result<FootprintResult, ClientError>>;
}

/// Decode a proxy response from its status and body.
pub fn decode_response(status: StatusCode, body: &str) -> Result<FootprintResult, ClientError> {
    if status.is_success() {
        return serde_json::from_str(body).map_err(|e| ClientError::Decode(e.to_string()));
    }
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(body) => Err(ClientError::Rejected {
            status: status.as_u16(),
            body,
        }),
        Err(_) => Err(ClientError::Decode(format!("status {} with body {:?}", status, body))),
    }
}

/// POSTs `{formData}` to the proxy over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    url: String,
}

impl HttpTransport {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
        }
    }
}

impl EstimateTransport for HttpTransport {
    async fn submit(&self, input: &LifestyleInput) -> Result<FootprintResult, ClientError> {
        let request = EstimateRequest {
            form_data: input.clone(),
        };
        debug!("Sending data to proxy at {}: {:?}", self.url, request);

        let response = self.client.post(&self.url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        info!("Proxy answered {}", status);
        decode_response(status, &body)
    }
}

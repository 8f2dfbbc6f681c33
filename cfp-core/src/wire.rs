//! JSON bodies exchanged between the client and the proxy.

use serde::{Deserialize, Serialize};

use crate::lifestyle::LifestyleInput;

/// Follow-up text attached to generic failures.
pub const GENERIC_DETAILS: &str = "Please check your input and try again";

/// `POST` body accepted by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub form_data: LifestyleInput,
}

/// Uniform failure body returned by the proxy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

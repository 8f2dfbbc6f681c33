/// Error types for footprint estimation
use thiserror::Error;

use crate::lifestyle::NEGATIVE_INPUT_MESSAGE;

/// Every way a submission can fail between the form and the rendered result.
#[derive(Error, Debug)]
pub enum EstimateError {
    /// Numeric input was negative; the submission never left the client
    #[error("{}", NEGATIVE_INPUT_MESSAGE)]
    Validation { fields: Vec<&'static str> },

    /// The request body could not be decoded as `{formData: ...}`
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// No credential for the chat-completion service
    #[error("AI service not configured")]
    NotConfigured,

    /// Upstream answered 429
    #[error("Rate limit exceeded. Please try again in a moment.")]
    RateLimited,

    /// Upstream answered 402
    #[error("AI credits exhausted. Please contact support.")]
    QuotaExhausted,

    /// Any other upstream failure: bad status, transport error, unexpected envelope
    #[error("AI prediction failed")]
    PredictionFailed { status: Option<u16>, reason: String },

    /// The model's reply contained no JSON object
    #[error("Invalid AI response format")]
    NoJsonObject,

    /// The JSON object in the reply did not parse
    #[error("Malformed AI response: {0}")]
    MalformedJson(#[from] serde_json::Error),

    /// The reply parsed but does not match the footprint result shape
    #[error("AI response failed validation: {0}")]
    Schema(String),
}

/// Type alias for Results using EstimateError
pub type Result<T> = std::result::Result<T, EstimateError>;

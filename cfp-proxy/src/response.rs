//! Response construction and error-to-status mapping.

use bytes::Bytes;
use cfp_core::wire::{ErrorBody, GENERIC_DETAILS};
use cfp_core::EstimateError;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::cors;

pub type HttpBody = Full<Bytes>;

fn with_body(status: StatusCode, body: Bytes, json: bool) -> Response<HttpBody> {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    cors::apply(headers);
    if json {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }
    response
}

/// Serialize `value` as the body of a JSON response.
pub fn json<T: Serialize>(status: StatusCode, value: &T) -> Response<HttpBody> {
    match serde_json::to_vec(value) {
        Ok(bytes) => with_body(status, Bytes::from(bytes), true),
        Err(e) => {
            log::error!("Failed to serialize response body: {}", e);
            with_body(
                StatusCode::INTERNAL_SERVER_ERROR,
                Bytes::from_static(br#"{"error":"Unknown error occurred"}"#),
                true,
            )
        }
    }
}

/// Empty 200 answering a CORS preflight.
pub fn preflight() -> Response<HttpBody> {
    with_body(StatusCode::OK, Bytes::new(), false)
}

/// HTTP status for an estimation failure.
///
/// Only the upstream rate-limit and quota conditions get their own status;
/// everything else is a 500.
pub fn status_for(err: &EstimateError) -> StatusCode {
    match err {
        EstimateError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        EstimateError::QuotaExhausted => StatusCode::PAYMENT_REQUIRED,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire body for an estimation failure. 429 and 402 carry no details.
pub fn error_body(err: &EstimateError) -> ErrorBody {
    let body = ErrorBody::new(err.to_string());
    match err {
        EstimateError::RateLimited | EstimateError::QuotaExhausted => body,
        _ => body.with_details(GENERIC_DETAILS),
    }
}

pub fn error(err: &EstimateError) -> Response<HttpBody> {
    json(status_for(err), &error_body(err))
}

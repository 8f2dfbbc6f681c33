//! Estimation proxy.
//!
//! A single stateless handler: decode `{formData}`, build the prompt pair,
//! make one chat-completion call, extract and validate the JSON object in the
//! reply and relay it. Every failure becomes a uniform `{error, details?}`
//! body.
//!
//! # Routes
//!
//! - `OPTIONS *` - CORS preflight
//! - `POST *` - estimate
//! - `GET /health` - liveness
//!
//! Anything else fails like a bad estimation request, with a 500.

pub mod cors;
pub mod response;

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use cfp_core::extract::extract_result;
use cfp_core::gateway::{ChatRequest, CompletionBackend};
use cfp_core::wire::EstimateRequest;
use cfp_core::EstimateError;
use http_body_util::{BodyExt, Limited};
use hyper::body::Body;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use log::{debug, error, info};
use tokio::net::TcpListener;

use crate::response::HttpBody;

/// Largest estimation request body accepted, in bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Shared, immutable handler state.
pub struct Proxy<B> {
    backend: B,
}

impl<B: CompletionBackend> Proxy<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Run one estimation from a raw request body to the relayed JSON object.
    pub async fn estimate(&self, body: &[u8]) -> cfp_core::Result<serde_json::Value> {
        let request: EstimateRequest = serde_json::from_slice(body)
            .map_err(|e| EstimateError::InvalidRequest(e.to_string()))?;
        let input = request.form_data.clamped();
        debug!("Received form data: {:?}", input);

        let chat = ChatRequest::for_input(self.backend.model(), &input);
        let content = self.backend.complete(&chat).await?;
        let extracted = extract_result(&content)?;
        Ok(extracted.raw)
    }
}

/// Route one HTTP request.
pub async fn handle_request<B, Req>(
    proxy: &Proxy<B>,
    req: Request<Req>,
) -> Result<Response<HttpBody>, Infallible>
where
    B: CompletionBackend,
    Req: Body,
    Req::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = match method {
        Method::OPTIONS => response::preflight(),
        Method::GET if path == "/health" => {
            response::json(StatusCode::OK, &serde_json::json!({ "status": "ok" }))
        }
        Method::POST => {
            let outcome = match Limited::new(req.into_body(), MAX_BODY_BYTES).collect().await {
                Ok(collected) => proxy.estimate(&collected.to_bytes()).await,
                Err(e) => Err(EstimateError::InvalidRequest(e.to_string())),
            };
            match outcome {
                Ok(result) => response::json(StatusCode::OK, &result),
                Err(e) => {
                    error!("Error in estimate handler: {}", e);
                    if let EstimateError::PredictionFailed { status, reason } = &e {
                        error!("Upstream failure (status {:?}): {}", status, reason);
                    }
                    response::error(&e)
                }
            }
        }
        _ => {
            let e = EstimateError::InvalidRequest(format!("unsupported method {}", method));
            error!("Error in estimate handler: {}", e);
            response::error(&e)
        }
    };

    info!("{} {} -> {}", method, path, response.status());
    Ok(response)
}

/// Accept connections on `addr` until the listener fails.
pub async fn serve<B>(addr: SocketAddr, backend: B) -> anyhow::Result<()>
where
    B: CompletionBackend + 'static,
{
    let proxy = Arc::new(Proxy::new(backend));
    let listener = TcpListener::bind(addr).await?;
    info!("Estimation proxy listening on http://{}", addr);

    loop {
        let (stream, peer) = listener.accept().await?;
        let proxy = Arc::clone(&proxy);

        tokio::spawn(async move {
            let service = service_fn(move |req| {
                let proxy = Arc::clone(&proxy);
                async move { handle_request(&*proxy, req).await }
            });
            if let Err(e) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use cfp_core::wire::GENERIC_DETAILS;
    use http_body_util::Full;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    const RESULT: &str = r#"{"carbonFootprint":14.2,"breakdown":[{"category":"energy","amount":3.1,"percentage":22},{"category":"transportation","amount":4.8,"percentage":34},{"category":"diet","amount":2.5,"percentage":18},{"category":"waste","amount":1.4,"percentage":10},{"category":"shopping","amount":2.4,"percentage":16}],"recommendations":["Switch to a green electricity tariff","Combine errands into fewer car trips","Replace two meat meals a week with plant-based ones","Compost food scraps","Buy second-hand where possible"],"comparison":{"average":16,"status":"average"}}"#;

    const FORM: &str = r#"{"formData":{"electricity":300,"naturalGas":50,"transportation":"car","mileage":500,"diet":"mixed","waste":"moderate","shopping":"moderate"}}"#;

    /// Canned backend that records every request it sees.
    struct StubBackend {
        reply: Box<dyn Fn() -> cfp_core::Result<String> + Send + Sync>,
        calls: AtomicUsize,
        last: Mutex<Option<ChatRequest>>,
    }

    impl StubBackend {
        fn replying(text: &str) -> Self {
            let text = text.to_string();
            Self::with(move || Ok(text.clone()))
        }

        fn with(reply: impl Fn() -> cfp_core::Result<String> + Send + Sync + 'static) -> Self {
            Self {
                reply: Box::new(reply),
                calls: AtomicUsize::new(0),
                last: Mutex::new(None),
            }
        }
    }

    impl CompletionBackend for StubBackend {
        async fn complete(&self, request: &ChatRequest) -> cfp_core::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last.lock().unwrap() = Some(request.clone());
            (self.reply)()
        }

        fn model(&self) -> &str {
            "stub-model"
        }
    }

    fn post(body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(Method::POST)
            .uri("/functions/v1/predict-climate-impact")
            .header("content-type", "application/json")
            .body(Full::new(Bytes::from(body.to_string())))
            .unwrap()
    }

    async fn send(
        proxy: &Proxy<StubBackend>,
        req: Request<Full<Bytes>>,
    ) -> (StatusCode, serde_json::Value) {
        let response = handle_request(proxy, req).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_relays_object_embedded_in_prose() {
        let reply = format!("Based on your data, here is the analysis:\n\n{}\n\nStay green!", RESULT);
        let proxy = Proxy::new(StubBackend::replying(&reply));
        let (status, body) = send(&proxy, post(FORM)).await;

        assert_eq!(status, StatusCode::OK);
        let expected: serde_json::Value = serde_json::from_str(RESULT).unwrap();
        assert_eq!(body, expected);
        assert_eq!(proxy.backend().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_outbound_request_uses_prompts() {
        let proxy = Proxy::new(StubBackend::replying(RESULT));
        send(&proxy, post(FORM)).await;

        let sent = proxy.backend().last.lock().unwrap().clone().unwrap();
        assert_eq!(sent.model, "stub-model");
        assert_eq!(sent.temperature, 0.3);
        assert_eq!(sent.messages[0].role, "system");
        assert_eq!(sent.messages[1].role, "user");
        assert!(sent.messages[1].content.contains("- Monthly Electricity: 300 kWh"));
        assert!(sent.messages[1].content.contains("- Primary Mode: car"));
    }

    #[tokio::test]
    async fn test_negative_values_are_clamped() {
        let proxy = Proxy::new(StubBackend::replying(RESULT));
        let form = FORM.replace("\"mileage\":500", "\"mileage\":-40");
        let (status, _) = send(&proxy, post(&form)).await;

        assert_eq!(status, StatusCode::OK);
        let sent = proxy.backend().last.lock().unwrap().clone().unwrap();
        assert!(sent.messages[1].content.contains("- Monthly Mileage: 0 miles"));
    }

    #[tokio::test]
    async fn test_reply_without_json_is_500() {
        let proxy = Proxy::new(StubBackend::replying("I am unable to estimate that."));
        let (status, body) = send(&proxy, post(FORM)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(body["details"], GENERIC_DETAILS);
    }

    #[tokio::test]
    async fn test_partial_object_is_rejected() {
        let proxy = Proxy::new(StubBackend::replying(r#"{"carbonFootprint": 9.1}"#));
        let (status, body) = send(&proxy, post(FORM)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("validation"));
    }

    #[tokio::test]
    async fn test_rate_limit_maps_to_429() {
        let proxy = Proxy::new(StubBackend::with(|| Err(EstimateError::RateLimited)));
        let (status, body) = send(&proxy, post(FORM)).await;

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert!(body["error"].as_str().unwrap().contains("Rate limit"));
        assert!(body.get("details").is_none());
    }

    #[tokio::test]
    async fn test_quota_maps_to_402() {
        let proxy = Proxy::new(StubBackend::with(|| Err(EstimateError::QuotaExhausted)));
        let (status, body) = send(&proxy, post(FORM)).await;

        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert!(body["error"].as_str().unwrap().contains("credits"));
    }

    #[tokio::test]
    async fn test_missing_credential_is_500() {
        let proxy = Proxy::new(StubBackend::with(|| Err(EstimateError::NotConfigured)));
        let (status, body) = send(&proxy, post(FORM)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "AI service not configured");
    }

    #[tokio::test]
    async fn test_other_upstream_failure_is_500() {
        let proxy = Proxy::new(StubBackend::with(|| {
            Err(EstimateError::PredictionFailed {
                status: Some(503),
                reason: "overloaded".to_string(),
            })
        }));
        let (status, body) = send(&proxy, post(FORM)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "AI prediction failed");
    }

    #[tokio::test]
    async fn test_bad_body_never_calls_upstream() {
        let proxy = Proxy::new(StubBackend::replying(RESULT));
        let (status, body) = send(&proxy, post(r#"{"form": {}}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
        assert_eq!(proxy.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_preflight() {
        let proxy = Proxy::new(StubBackend::replying(RESULT));
        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let response = handle_request(&proxy, req).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["access-control-allow-origin"], "*");
        assert_eq!(proxy.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_health() {
        let proxy = Proxy::new(StubBackend::replying(RESULT));
        let req = Request::builder()
            .method(Method::GET)
            .uri("/health")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, body) = send(&proxy, req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unsupported_method_is_uniform_500() {
        let proxy = Proxy::new(StubBackend::replying(RESULT));
        let req = Request::builder()
            .method(Method::DELETE)
            .uri("/")
            .body(Full::new(Bytes::new()))
            .unwrap();
        let (status, body) = send(&proxy, req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
        assert_eq!(body["details"], GENERIC_DETAILS);
        assert_eq!(proxy.backend().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_oversized_body_never_calls_upstream() {
        let proxy = Proxy::new(StubBackend::replying(RESULT));
        let padding = " ".repeat(MAX_BODY_BYTES);
        let (status, body) = send(&proxy, post(&format!("{}{}", FORM, padding))).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body"));
        assert_eq!(proxy.backend().calls.load(Ordering::SeqCst), 0);
    }
}

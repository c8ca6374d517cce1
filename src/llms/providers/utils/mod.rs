//! Provider utility functions shared across LLM providers.
//!
//! Holds the HTTP send loop every provider uses: retry with exponential
//! backoff on transport failures, rate limiting (429) and server errors (5xx),
//! immediate failure on any other non-success status.

use std::time::Duration;

use serde_json::Value;

use crate::utilities::errors::LlmError;

/// Retry settings for one provider call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubled after each retry.
    pub initial_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_backoff: Duration::from_secs(1),
        }
    }
}

/// Send a JSON request built by `build_request`, retrying transient failures.
///
/// `build_request` is called once per attempt since a `RequestBuilder` cannot
/// be reused after sending.
pub async fn send_with_retries<F>(
    provider: &'static str,
    policy: RetryPolicy,
    build_request: F,
) -> Result<Value, LlmError>
where
    F: Fn() -> reqwest::RequestBuilder,
{
    let mut last_error = String::from("no attempt made");
    let mut retry_delay = policy.initial_backoff;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            log::warn!(
                "{} API retry attempt {} after {:?}",
                provider,
                attempt,
                retry_delay
            );
            tokio::time::sleep(retry_delay).await;
            retry_delay *= 2;
        }

        let response = match build_request().send().await {
            Ok(resp) => resp,
            Err(e) => {
                last_error = e.to_string();
                continue;
            }
        };

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            last_error = format!("Rate limited by {} API (429)", provider);
            continue;
        }

        if status.is_server_error() {
            last_error = format!("{} API server error: {}", provider, status);
            continue;
        }

        let response_text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                last_error = e.to_string();
                continue;
            }
        };

        if !status.is_success() {
            return Err(LlmError::Api {
                provider,
                status: status.as_u16(),
                body: response_text,
            });
        }

        return Ok(serde_json::from_str(&response_text)?);
    }

    Err(LlmError::RetriesExhausted {
        provider,
        attempts: policy.max_retries + 1,
        last: last_error,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            initial_backoff: Duration::from_millis(5),
        }
    }

    #[tokio::test]
    async fn test_retries_server_error_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/echo"))
            .and(body_json(serde_json::json!({"a": 1})))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = format!("{}/echo", server.uri());
        let value = send_with_retries("Test", fast_policy(2), || {
            client.post(&url).json(&serde_json::json!({"a": 1}))
        })
        .await
        .unwrap();

        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"bad key"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = server.uri();
        let err = send_with_retries("Test", fast_policy(2), || client.post(&url))
            .await
            .unwrap_err();

        match err {
            LlmError::Api { status, body, .. } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limit_exhausts_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = server.uri();
        let err = send_with_retries("Test", fast_policy(1), || client.post(&url))
            .await
            .unwrap_err();

        match err {
            LlmError::RetriesExhausted { attempts, last, .. } => {
                assert_eq!(attempts, 2);
                assert!(last.contains("429"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_retried_until_exhausted() {
        // Bind then drop a listener so the port refuses connections.
        let closed = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/", closed.local_addr().unwrap());
        drop(closed);

        let client = reqwest::Client::new();
        let attempts = std::sync::atomic::AtomicU32::new(0);
        let err = send_with_retries("Test", fast_policy(2), || {
            attempts.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            client.post(&url)
        })
        .await
        .unwrap_err();

        assert_eq!(attempts.load(std::sync::atomic::Ordering::SeqCst), 3);
        match err {
            LlmError::RetriesExhausted { attempts, last, .. } => {
                assert_eq!(attempts, 3);
                assert!(last.contains("error sending request"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = reqwest::Client::new();
        let url = server.uri();
        let err = send_with_retries("Test", fast_policy(0), || client.post(&url))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Json(_)));
    }
}

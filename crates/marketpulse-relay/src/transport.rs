use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Transport-level failure, separate from HTTP-status and payload errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    message: String,
    retryable: bool,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: true,
        }
    }

    pub fn non_retryable(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            retryable: false,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for TransportError {}

/// Raw response handed back by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Async JSON-POST transport contract so the relay is testable offline.
pub trait ChatTransport: Send + Sync {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        bearer: &'a str,
        body: String,
        timeout_ms: u64,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>>;
}

/// Production transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Arc<reqwest::Client>,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: Arc::new(
                reqwest::Client::builder()
                    .user_agent("marketpulse/0.1.0")
                    .build()
                    .unwrap_or_else(|_| reqwest::Client::new()),
            ),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatTransport for ReqwestTransport {
    fn post_json<'a>(
        &'a self,
        url: &'a str,
        bearer: &'a str,
        body: String,
        timeout_ms: u64,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .client
                .post(url)
                .bearer_auth(bearer)
                .header("content-type", "application/json")
                .timeout(std::time::Duration::from_millis(timeout_ms))
                .body(body)
                .send()
                .await
                .map_err(|error| {
                    if error.is_timeout() {
                        TransportError::new(format!("request timeout: {error}"))
                    } else if error.is_connect() {
                        TransportError::new(format!("connection failed: {error}"))
                    } else {
                        TransportError::non_retryable(format!("request failed: {error}"))
                    }
                })?;

            let status = response.status().as_u16();
            let body = response.text().await.map_err(|error| {
                TransportError::new(format!("failed to read response body: {error}"))
            })?;

            Ok(TransportResponse { status, body })
        })
    }
}

/// Deterministic transport for offline tests: replays a fixed response
/// and records the request bodies it saw.
#[derive(Debug, Default)]
pub struct CannedTransport {
    status: u16,
    body: String,
    seen: std::sync::Mutex<Vec<String>>,
}

impl CannedTransport {
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Request bodies received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.seen
            .lock()
            .map(|seen| seen.clone())
            .unwrap_or_default()
    }
}

impl ChatTransport for CannedTransport {
    fn post_json<'a>(
        &'a self,
        _url: &'a str,
        _bearer: &'a str,
        body: String,
        _timeout_ms: u64,
    ) -> Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + Send + 'a>> {
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(body);
        }
        let response = TransportResponse {
            status: self.status,
            body: self.body.clone(),
        };
        Box::pin(async move { Ok(response) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_transport_records_requests() {
        let transport = CannedTransport::replying(200, "{}");
        let response = transport
            .post_json("https://example.test", "key", String::from("{\"a\":1}"), 1_000)
            .await
            .expect("canned response");

        assert!(response.is_success());
        assert_eq!(transport.requests(), vec![String::from("{\"a\":1}")]);
    }
}

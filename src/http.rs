//! HTTP transport
//!
//! Every outbound call goes through [`HttpTransport`], so the resolver and
//! catalog code never touch `reqwest` directly. [`ReqwestTransport`] is the
//! production implementation:
//! - Connection pooling with keep-alive
//! - TLS via rustls
//! - Brotli, Gzip, Deflate compression (auto-negotiated)
//! - Timeouts from [`ExtensionConfig`]

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use tracing::{debug, instrument};

use crate::config::ExtensionConfig;

/// Status and decoded body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// `true` for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::from_str(&self.body)
    }
}

/// Plain GET transport.
///
/// Errors mean the request never produced a response (DNS, connect, TLS,
/// timeout). Non-2xx statuses come back as ordinary responses.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse>;
}

/// [`HttpTransport`] backed by a pooled `reqwest` client.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    pub fn new(config: &ExtensionConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, application/vnd.apple.mpegurl, */*"),
        );

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            // Keep connections alive for the key → episode → manifest chain
            .pool_max_idle_per_host(4)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .use_rustls_tls()
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self), fields(url = %url))]
    async fn get(&self, url: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        debug!(status, version = ?response.version(), "Response received");

        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted transport shared by the unit tests.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;

    use super::{HttpResponse, HttpTransport};

    /// Answers from a fixed URL → response table and records every request.
    /// Unknown URLs fail like a refused connection.
    #[derive(Default)]
    pub struct ScriptedTransport {
        routes: HashMap<String, HttpResponse>,
        requests: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn route(mut self, url: impl Into<String>, status: u16, body: &str) -> Self {
            self.routes.insert(url.into(), HttpResponse::new(status, body));
            self
        }

        pub fn requests(&self) -> Vec<String> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpTransport for ScriptedTransport {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            self.requests.lock().unwrap().push(url.to_string());
            self.routes
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("connection refused: {url}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(404, "").is_success());
        assert!(!HttpResponse::new(503, "").is_success());
    }

    #[test]
    fn test_json_body() {
        let resp = HttpResponse::new(200, r#"{"key":"abc"}"#);
        assert_eq!(resp.json().unwrap()["key"], "abc");
        assert!(HttpResponse::new(200, "<html>").json().is_err());
    }

    #[test]
    fn test_build_from_default_config() {
        assert!(ReqwestTransport::new(&ExtensionConfig::default()).is_ok());
    }

    #[test]
    fn test_scripted_transport_records_requests() {
        let transport = testing::ScriptedTransport::new().route("https://h/ok", 200, "fine");
        let ok = tokio_test::block_on(transport.get("https://h/ok")).unwrap();
        assert_eq!(ok.body, "fine");
        assert!(tokio_test::block_on(transport.get("https://h/missing")).is_err());
        assert_eq!(transport.requests(), vec!["https://h/ok", "https://h/missing"]);
    }
}

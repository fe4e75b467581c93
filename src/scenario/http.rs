//! HTTP request/response model and the client seam
//!
//! Transport failures never surface as errors here. They come back as a
//! response with status `0` and an error message, so checks can record
//! them as failures and the iteration carries on.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use crate::common::{config::HttpConfig, Error, Result};

/// Supported request methods
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
        }
    }
}

/// A request built fresh for every iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
}

impl HttpRequest {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            url: url.into(),
        }
    }
}

/// Response handed to check predicates
#[derive(Debug, Clone, Default)]
pub struct HttpResponse {
    /// HTTP status code, `0` when the request never completed
    pub status: u16,
    pub body: String,
    /// Transport error message, if any
    pub error: Option<String>,
}

impl HttpResponse {
    /// Build a response for a request that failed before a status arrived
    pub fn transport_error(error: impl Into<String>) -> Self {
        Self {
            status: 0,
            body: String::new(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Issues requests on behalf of a scenario
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send the request; failures are reported inside the response
    async fn send(&self, request: &HttpRequest) -> HttpResponse;
}

/// `HttpClient` backed by a shared `reqwest::Client` connection pool
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::HttpClient(e.to_string()))?;
        Ok(Self { inner })
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn send(&self, request: &HttpRequest) -> HttpResponse {
        let builder = match request.method {
            Method::Get => self.inner.get(&request.url),
        };

        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!(url = %request.url, error = %e, "Request failed");
                return HttpResponse::transport_error(e.to_string());
            }
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => HttpResponse {
                status,
                body,
                error: None,
            },
            Err(e) => HttpResponse {
                status,
                body: String::new(),
                error: Some(format!("Failed to read response body: {}", e)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_error_is_not_success() {
        let response = HttpResponse::transport_error("connection refused");
        assert_eq!(response.status, 0);
        assert!(!response.is_success());
        assert_eq!(response.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_get_request() {
        let request = HttpRequest::get("http://localhost/api/v1/tokens");
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.method.to_string(), "GET");
    }

    #[tokio::test]
    async fn test_connection_refused_becomes_status_zero() {
        // Bind then drop to get a port nothing listens on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = ReqwestClient::new(&HttpConfig {
            timeout_secs: 2,
            ..HttpConfig::default()
        })
        .unwrap();

        let response = client
            .send(&HttpRequest::get(format!("http://127.0.0.1:{}/api/v1/tokens", port)))
            .await;

        assert_eq!(response.status, 0);
        assert!(response.error.is_some());
    }
}

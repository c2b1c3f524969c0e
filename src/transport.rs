//! HTTP transport for the accounts service.
//!
//! This module keeps connectivity logic in one place so the operation calls
//! can share request construction, timeouts, and error handling.
//!
//! Flow Overview:
//! - Build a `Transport` from a base URL such as `https://api.example.org`.
//! - Call `send` (or the `post_json`/`post_empty` helpers) with `/api/...`
//!   paths; success statuses hand the response back for decoding.
//! - Error statuses are read once and split: a parseable error document
//!   becomes [`TransportError::Api`] carrying the service's `code` and
//!   `detail`, anything else becomes [`TransportError::Status`].
//!
//! The split is what the per-operation outcome tables in [`crate::error`]
//! classify on; the transport itself never interprets error codes.

use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Error document the service attaches to failure statuses.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Machine-readable code naming the failure, when the service knows it.
    pub code: Option<String>,
    /// Human-readable description of the failure.
    #[serde(default)]
    pub detail: String,
}

/// Failures produced by a single request/response exchange.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The service answered with an error status and a structured error body.
    #[error("{url} - {status}, {}", .body.detail)]
    Api {
        url: String,
        status: StatusCode,
        body: ErrorResponse,
    },
    /// The service answered with an error status and no parseable error body.
    #[error("{url} - {status}")]
    Status { url: String, status: StatusCode },
    /// The exchange failed before an HTTP response was available, or the
    /// success body could not be decoded.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The base URL could not be turned into an endpoint URL.
    #[error("{0}")]
    BaseUrl(String),
}

impl TransportError {
    /// Structured error body, when the service produced one.
    #[must_use]
    pub fn response(&self) -> Option<&ErrorResponse> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Build a full endpoint URL from a base URL and a service path.
/// # Errors
/// Returns an error if `base_url` cannot be parsed, has no host, or uses an
/// unsupported scheme.
pub fn endpoint_url(base_url: &str, path: &str) -> Result<String, TransportError> {
    let url = Url::parse(base_url)
        .map_err(|error| TransportError::BaseUrl(format!("Error parsing URL: {error}")))?;

    let scheme = url.scheme();

    let host = url
        .host()
        .ok_or_else(|| TransportError::BaseUrl("Error parsing URL: no host specified".to_string()))?
        .to_owned();

    let port = match url.port() {
        Some(p) => p,
        None => match scheme {
            "http" => 80,
            "https" => 443,
            _ => {
                return Err(TransportError::BaseUrl(format!(
                    "Error parsing URL: unsupported scheme {scheme}"
                )))
            }
        },
    };

    let endpoint_url = format!("{scheme}://{host}:{port}{path}");

    debug!("endpoint URL: {}", endpoint_url);

    Ok(endpoint_url)
}

/// Shared HTTP client for the accounts service.
#[derive(Clone, Debug)]
pub struct Transport {
    client: Client,
    base_url: String,
}

impl Transport {
    /// Build a transport for the service at `base_url`.
    /// # Errors
    /// Returns an error if the base URL is unusable or the HTTP client cannot
    /// be constructed.
    pub fn new(user_agent: &str, base_url: &str) -> Result<Self, TransportError> {
        endpoint_url(base_url, "/")?;

        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(CONNECT_TIMEOUT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build a display URL for logging and error messages.
    /// # Errors
    /// Returns an error if the base URL cannot be parsed.
    pub fn endpoint_url(&self, path: &str) -> Result<String, TransportError> {
        endpoint_url(&self.base_url, path)
    }

    /// Execute a JSON request against the service.
    ///
    /// Success statuses return the raw response for the caller to decode.
    /// Error statuses consume the body and come back as [`TransportError::Api`]
    /// or [`TransportError::Status`] depending on whether the body parses as an
    /// [`ErrorResponse`].
    ///
    /// # Errors
    /// Returns an error if the request fails or the service answers with an
    /// error status.
    pub async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, TransportError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint_url(path)?;
        debug!("auth request: {} {}", method, url);

        let response = self
            .client
            .request(method, &url)
            .header("Accept", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await?;
        match serde_json::from_slice::<ErrorResponse>(&bytes) {
            Ok(body) => Err(TransportError::Api { url, status, body }),
            Err(_) => Err(TransportError::Status { url, status }),
        }
    }

    /// Execute a JSON `POST` and decode the success body.
    /// # Errors
    /// Returns an error if the request fails, the service answers with an
    /// error status, or the success body cannot be decoded as `T`.
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, TransportError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(Method::POST, path, body).await?;

        Ok(response.json::<T>().await?)
    }

    /// Execute a JSON `POST` and discard the success body.
    /// # Errors
    /// Returns an error if the request fails or the service answers with an
    /// error status.
    pub async fn post_empty<B>(&self, path: &str, body: &B) -> Result<(), TransportError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, path, body).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Result};
    use serde_json::json;
    use std::net::TcpListener;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const USER_AGENT: &str = "ensaluti-test/0.1";

    fn can_bind_localhost() -> bool {
        TcpListener::bind("127.0.0.1:0").is_ok()
    }

    #[test]
    fn endpoint_url_defaults_http_port() -> Result<()> {
        let url = endpoint_url("http://example.com", "/api/auth/login/")?;
        assert_eq!(url, "http://example.com:80/api/auth/login/");
        Ok(())
    }

    #[test]
    fn endpoint_url_defaults_https_port() -> Result<()> {
        let url = endpoint_url("https://example.com", "/api/auth/login/")?;
        assert_eq!(url, "https://example.com:443/api/auth/login/");
        Ok(())
    }

    #[test]
    fn endpoint_url_keeps_explicit_port() -> Result<()> {
        let url = endpoint_url("http://localhost:8000", "/api/auth/register/")?;
        assert_eq!(url, "http://localhost:8000/api/auth/register/");
        Ok(())
    }

    #[test]
    fn endpoint_url_rejects_unsupported_scheme() -> Result<()> {
        let err = endpoint_url("ftp://example.com", "/api/auth/login/")
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("unsupported scheme"));
        Ok(())
    }

    #[test]
    fn endpoint_url_requires_host() -> Result<()> {
        let err = endpoint_url("data:text/plain,hi", "/api/auth/login/")
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;
        assert!(err.to_string().contains("no host specified"));
        Ok(())
    }

    #[test]
    fn transport_rejects_unusable_base_url() {
        let result = Transport::new(USER_AGENT, "not a url");
        assert!(matches!(result, Err(TransportError::BaseUrl(_))));
    }

    #[test]
    fn error_response_tolerates_missing_fields() -> Result<()> {
        let body: ErrorResponse = serde_json::from_str(r#"{"detail":"nope"}"#)?;
        assert_eq!(body.code, None);
        assert_eq!(body.detail, "nope");

        let body: ErrorResponse = serde_json::from_str(r#"{"code":"login_failed"}"#)?;
        assert_eq!(body.code.as_deref(), Some("login_failed"));
        assert_eq!(body.detail, "");

        let body: ErrorResponse = serde_json::from_str("{}")?;
        assert_eq!(body.code, None);
        assert_eq!(body.detail, "");
        Ok(())
    }

    #[test]
    fn response_accessor_exposes_structured_body_only() {
        let api = TransportError::Api {
            url: "http://example.com:80/api/auth/login/".to_string(),
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                code: Some("login_failed".to_string()),
                detail: "Wrong email or password".to_string(),
            },
        };
        assert_eq!(
            api.response().and_then(|body| body.code.as_deref()),
            Some("login_failed")
        );

        let status = TransportError::Status {
            url: "http://example.com:80/api/auth/login/".to_string(),
            status: StatusCode::BAD_GATEWAY,
        };
        assert!(status.response().is_none());

        let base_url = TransportError::BaseUrl("Error parsing URL: no host specified".to_string());
        assert!(base_url.response().is_none());
    }

    #[test]
    fn transport_error_display_formats() {
        let api = TransportError::Api {
            url: "http://example.com:80/api/auth/login/".to_string(),
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse {
                code: Some("login_failed".to_string()),
                detail: "Wrong email or password".to_string(),
            },
        };
        assert_eq!(
            api.to_string(),
            "http://example.com:80/api/auth/login/ - 400 Bad Request, Wrong email or password"
        );

        let status = TransportError::Status {
            url: "http://example.com:80/api/auth/login/".to_string(),
            status: StatusCode::BAD_GATEWAY,
        };
        assert_eq!(
            status.to_string(),
            "http://example.com:80/api/auth/login/ - 502 Bad Gateway"
        );
    }

    #[tokio::test]
    async fn send_sets_user_agent_and_accept() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/echo/"))
            .and(header("user-agent", USER_AGENT))
            .and(header("accept", "application/json"))
            .and(body_json(json!({"ping": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"pong": true})))
            .mount(&server)
            .await;

        let transport = Transport::new(USER_AGENT, &server.uri())?;
        let body: serde_json::Value = transport.post_json("/api/echo/", &json!({"ping": true})).await?;
        assert_eq!(body, json!({"pong": true}));
        Ok(())
    }

    #[tokio::test]
    async fn send_splits_structured_error_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/echo/"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "login_failed",
                "detail": "Wrong email or password"
            })))
            .mount(&server)
            .await;

        let transport = Transport::new(USER_AGENT, &server.uri())?;
        let err = transport
            .post_empty("/api/echo/", &json!({}))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;

        match &err {
            TransportError::Api { url, status, body } => {
                assert_eq!(url, &format!("{}/api/echo/", server.uri()));
                assert_eq!(*status, StatusCode::BAD_REQUEST);
                assert_eq!(body.code.as_deref(), Some("login_failed"));
                assert_eq!(body.detail, "Wrong email or password");
            }
            other => return Err(anyhow!("expected Api error, got: {other}")),
        }
        assert!(err.to_string().ends_with("400 Bad Request, Wrong email or password"));
        Ok(())
    }

    #[tokio::test]
    async fn send_falls_back_on_unparseable_error_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/echo/"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let transport = Transport::new(USER_AGENT, &server.uri())?;
        let err = transport
            .post_empty("/api/echo/", &json!({}))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;

        assert!(matches!(
            err,
            TransportError::Status {
                status: StatusCode::BAD_GATEWAY,
                ..
            }
        ));
        assert!(err.response().is_none());
        Ok(())
    }

    #[tokio::test]
    async fn send_keeps_error_body_without_code() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/echo/"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"detail": "Server exploded"})),
            )
            .mount(&server)
            .await;

        let transport = Transport::new(USER_AGENT, &server.uri())?;
        let err = transport
            .post_empty("/api/echo/", &json!({}))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected error"))?;

        let body = err.response().ok_or_else(|| anyhow!("expected body"))?;
        assert_eq!(body.code, None);
        assert_eq!(body.detail, "Server exploded");
        Ok(())
    }

    #[tokio::test]
    async fn post_empty_discards_success_body() -> Result<()> {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return Ok(());
        }
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/echo/"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"ignored": "body"})))
            .mount(&server)
            .await;

        let transport = Transport::new(USER_AGENT, &server.uri())?;
        transport.post_empty("/api/echo/", &json!({})).await?;
        Ok(())
    }
}

//! HTTP access for the widgets.
//!
//! Widgets talk to their APIs through the [`HttpClient`] trait so they can be
//! exercised against canned responses. [`ReqwestClient`] is the real, blocking
//! implementation; callers run it off the UI thread.

use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Failure of a widget request, before any widget-specific message mapping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("{0} is not configured")]
    MissingKey(&'static str),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("HTTP {status}")]
    Status { status: u16, body: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Raw response: status code plus body text.
#[derive(Debug, Clone, PartialEq)]
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

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turns a non-2xx response into [`FetchError::Status`].
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::Status {
                status: self.status,
                body: self.body,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_str(&self.body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

/// Minimal HTTP surface the widgets need.
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError>;

    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, FetchError>;
}

/// Builds `base?k=v&…` with proper escaping.
pub fn build_url(base: &str, params: &[(&str, &str)]) -> Result<String, FetchError> {
    reqwest::Url::parse_with_params(base, params)
        .map(String::from)
        .map_err(|e| FetchError::Transport(format!("invalid url {base}: {e}")))
}

/// Blocking client backed by `reqwest`.
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(20))
            .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(Self { client })
    }

    fn finish(response: reqwest::blocking::Response) -> Result<HttpResponse, FetchError> {
        let status = response.status().as_u16();
        let body = response.text().map_err(|e| FetchError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

impl HttpClient for ReqwestClient {
    fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        log::debug!("GET {}", redact(url));
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;
        Self::finish(response)
    }

    fn post_json(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, FetchError> {
        log::debug!("POST {}", redact(url));
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;
        Self::finish(response)
    }
}

/// Drops the query string so API keys never reach the log.
fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}

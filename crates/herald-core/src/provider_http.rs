//! Blocking HTTP plumbing shared by provider adapters.
//!
//! One request per call, no retries. Non-success responses are returned as
//! [`ProviderError::HttpStatus`] so callers can classify them; transport
//! failures keep the underlying `reqwest` error.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use serde_json::Value;
use thiserror::Error;

pub const CLIENT_USER_AGENT: &str = "Code Climate";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;
const ERROR_BODY_MAX_CHARS: usize = 512;

#[derive(Debug, Error)]
/// Enumerates supported `ProviderError` values.
pub enum ProviderError {
    #[error("invalid {header} header")]
    InvalidHeader { header: &'static str },
    #[error("failed to build provider http client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    #[error("request to {endpoint_url} failed: {source}")]
    Transport {
        endpoint_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read response from {endpoint_url}: {source}")]
    Body {
        endpoint_url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("API request unsuccessful ({status})")]
    HttpStatus {
        status: u16,
        endpoint_url: String,
        body: String,
    },
}

impl ProviderError {
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Transport { endpoint_url, .. }
            | Self::Body { endpoint_url, .. }
            | Self::HttpStatus { endpoint_url, .. } => Some(endpoint_url.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
/// Successful provider response.
pub struct ProviderResponse {
    pub status: u16,
    pub endpoint_url: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl ProviderResponse {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|value| value.to_str().ok())
    }
}

#[derive(Debug, Clone)]
/// How credentials are attached to each request.
pub enum ProviderAuth {
    Header {
        name: &'static str,
        value: String,
    },
    Basic {
        username: String,
        password: String,
    },
}

#[derive(Debug, Clone)]
pub struct ProviderHttpClient {
    http: Client,
    basic_auth: Option<(String, String)>,
}

impl ProviderHttpClient {
    pub fn new(auth: ProviderAuth, request_timeout_ms: u64) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let basic_auth = match auth {
            ProviderAuth::Header { name, value } => {
                let header_name = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|_| ProviderError::InvalidHeader { header: name })?;
                let header_value = HeaderValue::from_str(value.trim())
                    .map_err(|_| ProviderError::InvalidHeader { header: name })?;
                headers.insert(header_name, header_value);
                None
            }
            ProviderAuth::Basic { username, password } => Some((username, password)),
        };

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(request_timeout_ms.max(1)))
            .build()
            .map_err(ProviderError::ClientBuild)?;
        Ok(Self { http, basic_auth })
    }

    pub fn post_json(
        &self,
        endpoint_url: &str,
        body: &Value,
    ) -> Result<ProviderResponse, ProviderError> {
        self.execute(endpoint_url, self.http.post(endpoint_url).json(body))
    }

    pub fn get(&self, endpoint_url: &str) -> Result<ProviderResponse, ProviderError> {
        self.execute(endpoint_url, self.http.get(endpoint_url))
    }

    fn execute(
        &self,
        endpoint_url: &str,
        request: RequestBuilder,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = match &self.basic_auth {
            Some((username, password)) => request.basic_auth(username, Some(password)),
            None => request,
        };
        let response = request.send().map_err(|source| ProviderError::Transport {
            endpoint_url: endpoint_url.to_string(),
            source,
        })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.text().map_err(|source| ProviderError::Body {
            endpoint_url: endpoint_url.to_string(),
            source,
        })?;
        tracing::debug!(
            endpoint_url = endpoint_url,
            status = status.as_u16(),
            "provider request completed"
        );
        if !status.is_success() {
            return Err(ProviderError::HttpStatus {
                status: status.as_u16(),
                endpoint_url: endpoint_url.to_string(),
                body: truncate_for_error(&body, ERROR_BODY_MAX_CHARS),
            });
        }
        Ok(ProviderResponse {
            status: status.as_u16(),
            endpoint_url: endpoint_url.to_string(),
            headers,
            body,
        })
    }
}

/// Joins a configured base URL and a path without doubling slashes.
pub fn join_endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

pub fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated = text.chars().take(max_chars).collect::<String>();
    format!("{truncated}...")
}

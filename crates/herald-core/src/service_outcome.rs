//! `{ok, message}` outcome returned after every handled event.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::provider_http::{ProviderError, ProviderResponse};

pub const UNKNOWN_STATE_MESSAGE: &str = "Unknown state";
pub const NOTHING_HAPPENED_MESSAGE: &str = "Nothing happened";
pub const DELIVERY_SUCCESS_MESSAGE: &str = "Success";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// Immutable result of one event-handling invocation.
///
/// When a network call ran, the receipt fields record where it went and
/// what was sent.
pub struct ServiceOutcome {
    ok: bool,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    endpoint_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

impl ServiceOutcome {
    pub fn new(ok: bool, message: impl Into<String>) -> Self {
        Self {
            ok,
            message: message.into(),
            endpoint_url: None,
            status: None,
            params: None,
        }
    }

    pub fn simple_failure(message: impl Into<String>) -> Self {
        Self::new(false, message)
    }

    pub fn unknown_state() -> Self {
        Self::simple_failure(UNKNOWN_STATE_MESSAGE)
    }

    pub fn nothing_happened() -> Self {
        Self::simple_failure(NOTHING_HAPPENED_MESSAGE)
    }

    /// Encodes a delivery attempt. Provider failures become `ok: false`.
    pub fn from_delivery(result: Result<ProviderResponse, ProviderError>, params: Value) -> Self {
        match result {
            Ok(response) => Self {
                ok: true,
                message: DELIVERY_SUCCESS_MESSAGE.to_string(),
                endpoint_url: Some(response.endpoint_url),
                status: Some(response.status),
                params: Some(params),
            },
            Err(error) => {
                tracing::warn!(
                    endpoint_url = error.endpoint_url().unwrap_or("unknown"),
                    status = error.http_status(),
                    error = %error,
                    "provider delivery failed"
                );
                let message = match &error {
                    ProviderError::Transport { source, .. } => {
                        format!("Service unavailable: {source}")
                    }
                    other => other.to_string(),
                };
                Self {
                    ok: false,
                    message,
                    endpoint_url: error.endpoint_url().map(str::to_string),
                    status: error.http_status(),
                    params: Some(params),
                }
            }
        }
    }

    pub fn ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn endpoint_url(&self) -> Option<&str> {
        self.endpoint_url.as_deref()
    }

    pub fn status(&self) -> Option<u16> {
        self.status
    }

    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }
}

//! Hard failures that escape event handling instead of being encoded as an
//! outcome.

use thiserror::Error;

use crate::provider_http::ProviderError;

#[derive(Debug, Error)]
/// Enumerates supported `ServiceError` values.
pub enum ServiceError {
    #[error("event is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("event field `{field}` is invalid: {detail}")]
    InvalidField { field: &'static str, detail: String },
    #[error("capability probe failed: {0}")]
    Probe(#[source] ProviderError),
}

impl ServiceError {
    pub fn is_probe_failure(&self) -> bool {
        matches!(self, Self::Probe(_))
    }
}

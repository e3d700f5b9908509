//! Credential capability probing for the `test` request path.
//!
//! The status probe posts a benign status against [`NEUTRAL_COMMIT_SHA`];
//! the provider's designated "commit not found" code proves the credential
//! authenticated. Only client errors count as a negative answer. Anything
//! else aborts the test with [`ServiceError::Probe`].

use crate::provider_contract::{PullRequestProvider, StatusUpdate};
use crate::provider_http::{ProviderError, ProviderResponse};
use crate::service_error::ServiceError;
use crate::service_event::{RepositoryRef, TestEvent, NEUTRAL_COMMIT_SHA};
use crate::service_outcome::ServiceOutcome;

pub const VALID_TOKEN_MESSAGE: &str = "Access token is valid.";
pub const CANT_POST_COMMENTS_MESSAGE: &str = "Access token is invalid - can't post comments";
pub const CANT_UPDATE_STATUS_MESSAGE: &str = "Access token is invalid - can't update status.";
pub const INVALID_TOKEN_MESSAGE: &str = "Access token is invalid.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Comment-write capability; `Untested` when the feature is off or unsupported.
pub enum CommentCapability {
    Untested,
    Denied,
    Granted,
}

impl CommentCapability {
    pub fn from_probe(granted: bool) -> Self {
        if granted {
            Self::Granted
        } else {
            Self::Denied
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilityReport {
    pub can_update_status: bool,
    pub can_post_comments: CommentCapability,
}

impl CapabilityReport {
    pub fn message(&self) -> &'static str {
        match (self.can_update_status, self.can_post_comments) {
            (true, CommentCapability::Granted) => VALID_TOKEN_MESSAGE,
            (true, CommentCapability::Untested) => VALID_TOKEN_MESSAGE,
            (true, CommentCapability::Denied) => CANT_POST_COMMENTS_MESSAGE,
            (false, CommentCapability::Untested) => CANT_UPDATE_STATUS_MESSAGE,
            (false, CommentCapability::Granted) => CANT_UPDATE_STATUS_MESSAGE,
            (false, CommentCapability::Denied) => INVALID_TOKEN_MESSAGE,
        }
    }

    pub fn ok(&self) -> bool {
        self.can_update_status && self.can_post_comments != CommentCapability::Denied
    }

    pub fn to_outcome(self) -> ServiceOutcome {
        ServiceOutcome::new(self.ok(), self.message())
    }
}

/// Interprets the status-write probe response.
pub fn classify_status_probe(
    result: Result<ProviderResponse, ProviderError>,
    status_probe_code: u16,
) -> Result<bool, ProviderError> {
    match result {
        Ok(_) => Ok(true),
        Err(error) => match error.http_status() {
            Some(status) if status == status_probe_code => Ok(true),
            Some(status) if (400..=499).contains(&status) => Ok(false),
            _ => Err(error),
        },
    }
}

pub fn probe_status_write<P>(
    provider: &P,
    repository: &RepositoryRef<'_>,
) -> Result<bool, ServiceError>
where
    P: PullRequestProvider + ?Sized,
{
    let descriptor = provider.descriptor();
    let endpoint_url = provider.status_url(repository, NEUTRAL_COMMIT_SHA)?;
    let body = provider.status_body(&StatusUpdate::probe());
    let result = provider.client().post_json(&endpoint_url, &body);
    let can_update_status = classify_status_probe(result, descriptor.status_probe_code)
        .map_err(ServiceError::Probe)?;
    tracing::debug!(
        provider = descriptor.name,
        can_update_status = can_update_status,
        "status-write probe finished"
    );
    Ok(can_update_status)
}

/// Only probes when the provider supports comments and the feature is on.
pub fn probe_comment_write<P>(provider: &P) -> Result<CommentCapability, ServiceError>
where
    P: PullRequestProvider + ?Sized,
{
    if !provider.settings().welcome_comment_enabled {
        return Ok(CommentCapability::Untested);
    }
    let Some(comments) = provider.comments() else {
        return Ok(CommentCapability::Untested);
    };
    let granted = comments
        .probe_comment_write()
        .map_err(ServiceError::Probe)?;
    tracing::debug!(
        provider = provider.descriptor().name,
        can_post_comments = granted,
        "comment-write probe finished"
    );
    Ok(CommentCapability::from_probe(granted))
}

pub fn run_capability_test<P>(provider: &P, event: &TestEvent) -> Result<ServiceOutcome, ServiceError>
where
    P: PullRequestProvider + ?Sized,
{
    let can_update_status = probe_status_write(provider, &event.repository())?;
    let can_post_comments = probe_comment_write(provider)?;
    let report = CapabilityReport {
        can_update_status,
        can_post_comments,
    };
    Ok(report.to_outcome())
}

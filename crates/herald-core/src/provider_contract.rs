//! Contracts provider crates implement.
//!
//! A pull request provider supplies URL templating, request bodies and its
//! probe code; the engine in this crate owns the decisions. Comment posting
//! is an optional capability exposed through [`PullRequestProvider::comments`].

use serde_json::{json, Map, Value};

use crate::provider_http::{ProviderError, ProviderHttpClient};
use crate::pull_request_config::PullRequestSettings;
use crate::service_error::ServiceError;
use crate::service_event::{RepositoryRef, ServiceEvent};
use crate::service_outcome::ServiceOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Status reported to the provider, independent of its wire keyword.
pub enum ReportedStatus {
    Pending,
    Success,
    Failure,
    Error,
}

impl ReportedStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusUpdate {
    pub state: ReportedStatus,
    pub description: Option<String>,
    pub context: Option<String>,
    pub target_url: Option<String>,
}

impl StatusUpdate {
    /// Benign payload sent by the status-write probe.
    pub fn probe() -> Self {
        Self {
            state: ReportedStatus::Success,
            description: None,
            context: None,
            target_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Config tag, e.g. `github_pull_requests`.
    pub name: &'static str,
    pub title: &'static str,
    /// Error status meaning "authenticated, but the neutral commit does not exist".
    pub status_probe_code: u16,
}

/// A source-control provider that can report commit statuses.
pub trait PullRequestProvider {
    fn descriptor(&self) -> ProviderDescriptor;

    fn settings(&self) -> &PullRequestSettings;

    fn client(&self) -> &ProviderHttpClient;

    fn status_keyword(&self, status: ReportedStatus) -> &'static str;

    fn status_url(
        &self,
        repository: &RepositoryRef<'_>,
        commit_sha: &str,
    ) -> Result<String, ServiceError>;

    /// `{state, description, context, target_url}`, omitting absent fields.
    fn status_body(&self, update: &StatusUpdate) -> Value {
        let mut body = Map::new();
        body.insert("state".to_string(), json!(self.status_keyword(update.state)));
        if let Some(description) = &update.description {
            body.insert("description".to_string(), json!(description));
        }
        if let Some(context) = &update.context {
            body.insert("context".to_string(), json!(context));
        }
        if let Some(target_url) = &update.target_url {
            body.insert("target_url".to_string(), json!(target_url));
        }
        Value::Object(body)
    }

    /// `None` when the provider cannot post pull request comments.
    fn comments(&self) -> Option<&dyn CommentSupport> {
        None
    }
}

/// Comment posting plus the read-only probe that checks it is permitted.
pub trait CommentSupport {
    fn comment_url(
        &self,
        repository: &RepositoryRef<'_>,
        number: u64,
    ) -> Result<String, ServiceError>;

    fn comment_body(&self, body: &str) -> Value {
        json!({ "body": body })
    }

    fn probe_comment_write(&self) -> Result<bool, ProviderError>;
}

/// Entry point every configured service exposes.
pub trait Service {
    fn title(&self) -> &'static str;

    fn receive(&self, event: &ServiceEvent) -> Result<ServiceOutcome, ServiceError>;
}

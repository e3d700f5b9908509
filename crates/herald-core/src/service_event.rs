//! Inbound pipeline event payloads.
//!
//! Events arrive as JSON objects tagged by `name`. Fields that only some
//! reporting paths need are optional here and are required at the point of
//! use, so an unrecognized lifecycle `state` can still be reported without
//! the rest of the payload being present.

use serde::{Deserialize, Serialize};

use crate::service_error::ServiceError;

/// Commit reference used by the status-write probe. No repository has it.
pub const NEUTRAL_COMMIT_SHA: &str = "0000000000000000000000000000000000000000";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
/// Enumerates supported `ServiceEvent` kinds.
pub enum ServiceEvent {
    Test(TestEvent),
    PullRequest(PullRequestEvent),
    PullRequestCoverage(PullRequestEvent),
    PullRequestWelcomeComment(WelcomeCommentEvent),
    Coverage(CoverageEvent),
    Quality(QualityEvent),
    Vulnerability(VulnerabilityEvent),
    /// Any other `name`; services answer it with "Nothing happened".
    #[serde(other)]
    Unrecognized,
}

impl ServiceEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Test(_) => "test",
            Self::PullRequest(_) => "pull_request",
            Self::PullRequestCoverage(_) => "pull_request_coverage",
            Self::PullRequestWelcomeComment(_) => "pull_request_welcome_comment",
            Self::Coverage(_) => "coverage",
            Self::Quality(_) => "quality",
            Self::Vulnerability(_) => "vulnerability",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub fn parse_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Lifecycle state of one analysis run for one commit.
pub enum LifecycleState {
    Pending,
    Success,
    Failure,
    Skipped,
    Error,
}

impl LifecycleState {
    /// Returns `None` for anything outside the five known states.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "success" => Some(Self::Success),
            "failure" => Some(Self::Failure),
            "skipped" => Some(Self::Skipped),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Success => "success",
            Self::Failure => "failure",
            Self::Skipped => "skipped",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct IssueComparisonCounts {
    pub new: Option<u64>,
    pub fixed: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Borrowed view of the repository identifiers an event carries.
pub struct RepositoryRef<'a> {
    pub github_slug: Option<&'a str>,
    pub git_url: Option<&'a str>,
}

impl<'a> RepositoryRef<'a> {
    pub fn github_slug(&self) -> Result<&'a str, ServiceError> {
        require_field(self.github_slug, "github_slug")
    }

    pub fn git_url(&self) -> Result<&'a str, ServiceError> {
        require_field(self.git_url, "git_url")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TestEvent {
    pub github_slug: Option<String>,
    pub git_url: Option<String>,
    pub repo_name: Option<String>,
}

impl TestEvent {
    pub fn repository(&self) -> RepositoryRef<'_> {
        RepositoryRef {
            github_slug: self.github_slug.as_deref(),
            git_url: self.git_url.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Lifecycle and coverage payload for one pull request commit.
pub struct PullRequestEvent {
    pub state: Option<String>,
    pub github_slug: Option<String>,
    pub git_url: Option<String>,
    pub commit_sha: Option<String>,
    pub number: Option<u64>,
    pub details_url: Option<String>,
    pub message: Option<String>,
    pub issue_comparison_counts: Option<IssueComparisonCounts>,
    pub covered_percent: Option<f64>,
    pub covered_percent_delta: Option<f64>,
}

impl PullRequestEvent {
    pub fn repository(&self) -> RepositoryRef<'_> {
        RepositoryRef {
            github_slug: self.github_slug.as_deref(),
            git_url: self.git_url.as_deref(),
        }
    }

    pub fn commit_sha(&self) -> Result<&str, ServiceError> {
        require_field(self.commit_sha.as_deref(), "commit_sha")
    }

    /// Explicit free-text message; a JSON `null` counts as absent.
    pub fn explicit_message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WelcomeCommentEvent {
    pub github_slug: Option<String>,
    pub git_url: Option<String>,
    pub number: Option<u64>,
    pub author_username: Option<String>,
    pub author_is_site_admin: Option<bool>,
    pub pull_request_integration_edit_url: Option<String>,
}

impl WelcomeCommentEvent {
    pub fn repository(&self) -> RepositoryRef<'_> {
        RepositoryRef {
            github_slug: self.github_slug.as_deref(),
            git_url: self.git_url.as_deref(),
        }
    }

    pub fn number(&self) -> Result<u64, ServiceError> {
        self.number.ok_or(ServiceError::MissingField("number"))
    }

    pub fn author_username(&self) -> Result<&str, ServiceError> {
        require_field(self.author_username.as_deref(), "author_username")
    }

    pub fn author_is_site_admin(&self) -> Result<bool, ServiceError> {
        self.author_is_site_admin
            .ok_or(ServiceError::MissingField("author_is_site_admin"))
    }

    pub fn edit_url(&self) -> Result<&str, ServiceError> {
        require_field(
            self.pull_request_integration_edit_url.as_deref(),
            "pull_request_integration_edit_url",
        )
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoverageEvent {
    pub repo_name: Option<String>,
    pub covered_percent: Option<f64>,
    pub previous_covered_percent: Option<f64>,
    pub covered_percent_delta: Option<f64>,
    pub details_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct QualityEvent {
    pub repo_name: Option<String>,
    pub constant_name: Option<String>,
    pub rating: Option<String>,
    pub previous_rating: Option<String>,
    pub remediation_cost: Option<f64>,
    pub previous_remediation_cost: Option<f64>,
    pub details_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Vulnerability {
    pub warning_type: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VulnerabilityEvent {
    pub repo_name: Option<String>,
    pub warning_type: Option<String>,
    pub vulnerabilities: Vec<Vulnerability>,
    pub details_url: Option<String>,
}

/// Resolves a required payload field, treating blank strings as absent.
pub fn require_field<'a>(
    value: Option<&'a str>,
    field: &'static str,
) -> Result<&'a str, ServiceError> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ServiceError::MissingField(field))
}

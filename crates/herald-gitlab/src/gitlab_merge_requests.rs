//! GitLab commit-status provider.
//!
//! GitLab addresses projects by URL-escaped path, so the project is derived
//! from the event's `git_url` rather than a GitHub slug. Comments are not
//! supported.

use herald_core::{
    ConfigError, ProviderAuth, ProviderDescriptor, ProviderHttpClient, PullRequestProvider,
    PullRequestSettings, RepositoryRef, ReportedStatus, ServiceError, StatusUpdate,
};
use reqwest::Url;
use serde_json::{json, Map, Value};

use crate::gitlab_config::{parse_base_url, GitlabMergeRequestsConfig};

pub const GITLAB_PROVIDER_NAME: &str = "gitlab_merge_requests";
pub const GITLAB_PROVIDER_TITLE: &str = "GitLab Merge Requests";
const GITLAB_STATUS_PROBE_CODE: u16 = 404;

#[derive(Debug, Clone)]
pub struct GitlabMergeRequests {
    config: GitlabMergeRequestsConfig,
    base_url: Url,
    client: ProviderHttpClient,
}

impl GitlabMergeRequests {
    pub fn new(config: &GitlabMergeRequestsConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let base_url = parse_base_url(&config.base_url)?;
        let client = ProviderHttpClient::new(
            ProviderAuth::Header {
                name: "private-token",
                value: config.access_token.clone(),
            },
            config.settings.request_timeout_ms,
        )
        .map_err(|error| ConfigError::InvalidValue {
            field: "access_token",
            detail: error.to_string(),
        })?;
        Ok(Self {
            config,
            base_url,
            client,
        })
    }
}

impl PullRequestProvider for GitlabMergeRequests {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: GITLAB_PROVIDER_NAME,
            title: GITLAB_PROVIDER_TITLE,
            status_probe_code: GITLAB_STATUS_PROBE_CODE,
        }
    }

    fn settings(&self) -> &PullRequestSettings {
        &self.config.settings
    }

    fn client(&self) -> &ProviderHttpClient {
        &self.client
    }

    fn status_keyword(&self, status: ReportedStatus) -> &'static str {
        match status {
            ReportedStatus::Pending => "running",
            ReportedStatus::Success => "success",
            ReportedStatus::Failure | ReportedStatus::Error => "failed",
        }
    }

    fn status_url(
        &self,
        repository: &RepositoryRef<'_>,
        commit_sha: &str,
    ) -> Result<String, ServiceError> {
        let project_path = project_path_from_git_url(repository.git_url()?)?;
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ServiceError::InvalidField {
                field: "base_url",
                detail: "cannot be used as a base url".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "v4", "projects", project_path.as_str(), "statuses", commit_sha]);
        Ok(url.to_string())
    }

    fn status_body(&self, update: &StatusUpdate) -> Value {
        let mut body = Map::new();
        body.insert("state".to_string(), json!(self.status_keyword(update.state)));
        if let Some(context) = &update.context {
            body.insert("name".to_string(), json!(context));
        }
        if let Some(description) = &update.description {
            body.insert("description".to_string(), json!(description));
        }
        if let Some(target_url) = &update.target_url {
            body.insert("target_url".to_string(), json!(target_url));
        }
        Value::Object(body)
    }
}

/// Extracts `group/project` from an `ssh://`, `https://` or scp-style clone URL.
pub fn project_path_from_git_url(git_url: &str) -> Result<String, ServiceError> {
    let invalid = |detail: &str| ServiceError::InvalidField {
        field: "git_url",
        detail: format!("{detail}: '{git_url}'"),
    };
    let raw_path = if git_url.contains("://") {
        let url = Url::parse(git_url).map_err(|error| invalid(&error.to_string()))?;
        url.path().to_string()
    } else {
        match git_url.split_once(':') {
            Some((_, path)) => path.to_string(),
            None => return Err(invalid("unrecognized clone url")),
        }
    };
    let trimmed = raw_path.trim_matches('/');
    let project_path = trimmed.strip_suffix(".git").unwrap_or(trimmed);
    if project_path.is_empty() {
        return Err(invalid("clone url has no project path"));
    }
    Ok(project_path.to_string())
}

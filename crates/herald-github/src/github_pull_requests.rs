//! GitHub commit-status and issue-comment provider.
//!
//! Statuses go to `POST /repos/{slug}/statuses/{sha}` and welcome comments to
//! `POST /repos/{slug}/issues/{number}/comments`. The comment-write probe
//! reads the `x-oauth-scopes` header of `GET /user`.

use herald_core::{
    join_endpoint, CommentSupport, ConfigError, ProviderAuth, ProviderDescriptor, ProviderError,
    ProviderHttpClient, PullRequestProvider, PullRequestSettings, RepositoryRef, ReportedStatus,
    ServiceError,
};

use crate::github_config::GithubPullRequestsConfig;

pub const GITHUB_PROVIDER_NAME: &str = "github_pull_requests";
pub const GITHUB_PROVIDER_TITLE: &str = "GitHub Pull Requests";
const GITHUB_STATUS_PROBE_CODE: u16 = 422;
const REQUIRED_COMMENT_SCOPE: &str = "repo";

#[derive(Debug, Clone)]
pub struct GithubPullRequests {
    config: GithubPullRequestsConfig,
    client: ProviderHttpClient,
}

impl GithubPullRequests {
    pub fn new(config: &GithubPullRequestsConfig) -> Result<Self, ConfigError> {
        let config = config.validated()?;
        let client = ProviderHttpClient::new(
            ProviderAuth::Header {
                name: "authorization",
                value: format!("token {}", config.oauth_token),
            },
            config.settings.request_timeout_ms,
        )
        .map_err(|error| ConfigError::InvalidValue {
            field: "oauth_token",
            detail: error.to_string(),
        })?;
        Ok(Self { config, client })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn user_url(&self) -> String {
        join_endpoint(&self.config.base_url, "user")
    }
}

impl PullRequestProvider for GithubPullRequests {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: GITHUB_PROVIDER_NAME,
            title: GITHUB_PROVIDER_TITLE,
            status_probe_code: GITHUB_STATUS_PROBE_CODE,
        }
    }

    fn settings(&self) -> &PullRequestSettings {
        &self.config.settings
    }

    fn client(&self) -> &ProviderHttpClient {
        &self.client
    }

    fn status_keyword(&self, status: ReportedStatus) -> &'static str {
        status.as_str()
    }

    fn status_url(
        &self,
        repository: &RepositoryRef<'_>,
        commit_sha: &str,
    ) -> Result<String, ServiceError> {
        let slug = repository.github_slug()?;
        Ok(join_endpoint(
            &self.config.base_url,
            &format!("repos/{slug}/statuses/{commit_sha}"),
        ))
    }

    fn comments(&self) -> Option<&dyn CommentSupport> {
        Some(self)
    }
}

impl CommentSupport for GithubPullRequests {
    fn comment_url(
        &self,
        repository: &RepositoryRef<'_>,
        number: u64,
    ) -> Result<String, ServiceError> {
        let slug = repository.github_slug()?;
        Ok(join_endpoint(
            &self.config.base_url,
            &format!("repos/{slug}/issues/{number}/comments"),
        ))
    }

    fn probe_comment_write(&self) -> Result<bool, ProviderError> {
        let response = self.client.get(&self.user_url())?;
        let scopes = response.header("x-oauth-scopes").unwrap_or_default();
        tracing::debug!(scopes = scopes, "github token scopes");
        Ok(scopes_include(scopes, REQUIRED_COMMENT_SCOPE))
    }
}

/// Checks a comma-separated scope header for one exact scope.
pub fn scopes_include(raw_scopes: &str, scope: &str) -> bool {
    raw_scopes
        .split(',')
        .map(str::trim)
        .any(|candidate| candidate == scope)
}

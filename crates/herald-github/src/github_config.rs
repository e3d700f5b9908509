use herald_core::{require_config_value, ConfigError, PullRequestSettings};
use serde::{Deserialize, Serialize};

pub const DEFAULT_GITHUB_API_BASE: &str = "https://api.github.com";

fn default_github_api_base() -> String {
    DEFAULT_GITHUB_API_BASE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Credential and settings for the GitHub pull request provider.
pub struct GithubPullRequestsConfig {
    /// Personal OAuth token with permissions for the repository.
    #[serde(default)]
    pub oauth_token: String,
    #[serde(default = "default_github_api_base")]
    pub base_url: String,
    #[serde(flatten)]
    pub settings: PullRequestSettings,
}

impl GithubPullRequestsConfig {
    pub fn new(oauth_token: impl Into<String>) -> Self {
        Self {
            oauth_token: oauth_token.into(),
            base_url: default_github_api_base(),
            settings: PullRequestSettings::default(),
        }
    }

    /// Returns a copy with the token and base URL trimmed.
    pub fn validated(&self) -> Result<Self, ConfigError> {
        let oauth_token = require_config_value(&self.oauth_token, "oauth_token")?;
        let base_url = require_config_value(&self.base_url, "base_url")?
            .trim_end_matches('/')
            .to_string();
        self.settings.validate()?;
        Ok(Self {
            oauth_token,
            base_url,
            settings: self.settings.clone(),
        })
    }
}

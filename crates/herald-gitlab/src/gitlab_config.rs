use herald_core::{require_config_value, ConfigError, PullRequestSettings};
use reqwest::Url;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GITLAB_BASE: &str = "https://gitlab.com";

fn default_gitlab_base() -> String {
    DEFAULT_GITLAB_BASE.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GitlabMergeRequestsConfig {
    /// Personal access token sent as `PRIVATE-TOKEN`.
    #[serde(default)]
    pub access_token: String,
    #[serde(default = "default_gitlab_base")]
    pub base_url: String,
    #[serde(flatten)]
    pub settings: PullRequestSettings,
}

impl GitlabMergeRequestsConfig {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            base_url: default_gitlab_base(),
            settings: PullRequestSettings::default(),
        }
    }

    pub fn validated(&self) -> Result<Self, ConfigError> {
        let access_token = require_config_value(&self.access_token, "access_token")?;
        let base_url = require_config_value(&self.base_url, "base_url")?
            .trim_end_matches('/')
            .to_string();
        parse_base_url(&base_url)?;
        self.settings.validate()?;
        Ok(Self {
            access_token,
            base_url,
            settings: self.settings.clone(),
        })
    }
}

/// Parses the instance URL, rejecting anything that cannot carry an API path.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|error| ConfigError::InvalidValue {
        field: "base_url",
        detail: error.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field: "base_url",
            detail: format!("'{raw}' cannot be used as a base url"),
        });
    }
    Ok(url)
}

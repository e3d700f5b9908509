//! Settings shared by pull-request status providers.
//!
//! Provider configs embed [`PullRequestSettings`] next to their credential.
//! Everything is validated once when the service is built and is read-only
//! afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::provider_http::DEFAULT_REQUEST_TIMEOUT_MS;

pub const DEFAULT_STATUS_CONTEXT: &str = "codeclimate";
pub const COVERAGE_CONTEXT_SUFFIX: &str = "/coverage";
pub const DEFAULT_WELCOME_COMMENT_MARKDOWN: &str = "\
* This repository is using Code Climate to automatically check for code quality issues.
* You can see results for this analysis in the PR status below.
* You can install [the Code Climate browser extension](https://codeclimate.com/browser) to see analysis without leaving GitHub.

Thanks for your contribution!
";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Enumerates supported `ConfigError` values.
pub enum ConfigError {
    #[error("config field `{field}` must not be empty")]
    MissingValue { field: &'static str },
    #[error("config field `{field}` is invalid: {detail}")]
    InvalidValue { field: &'static str, detail: String },
}

fn default_status_context() -> String {
    DEFAULT_STATUS_CONTEXT.to_string()
}

fn default_welcome_comment_markdown() -> String {
    DEFAULT_WELCOME_COMMENT_MARKDOWN.to_string()
}

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestSettings {
    /// Label shown next to the pull request status.
    #[serde(default = "default_status_context")]
    pub context: String,
    #[serde(default)]
    pub welcome_comment_enabled: bool,
    /// Body of the welcome comment for first-time contributors.
    #[serde(default = "default_welcome_comment_markdown")]
    pub welcome_comment_markdown: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for PullRequestSettings {
    fn default() -> Self {
        Self {
            context: default_status_context(),
            welcome_comment_enabled: false,
            welcome_comment_markdown: default_welcome_comment_markdown(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl PullRequestSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_config_value(&self.context, "context")?;
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                detail: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    pub fn coverage_context(&self) -> String {
        format!("{}{COVERAGE_CONTEXT_SUFFIX}", self.context)
    }
}

/// Trims a required config value, rejecting blank input.
pub fn require_config_value(raw: &str, field: &'static str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::MissingValue { field });
    }
    Ok(trimmed.to_string())
}

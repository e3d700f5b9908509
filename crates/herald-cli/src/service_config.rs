//! Tagged service config and the registry that builds a service from it.

use std::path::Path;

use anyhow::{Context, Result};
use herald_campfire::{CampfireConfig, CampfireService};
use herald_core::{PullRequestService, Service};
use herald_github::{GithubPullRequests, GithubPullRequestsConfig};
use herald_gitlab::{GitlabMergeRequests, GitlabMergeRequestsConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "provider", rename_all = "snake_case")]
pub enum ServiceConfig {
    GithubPullRequests(GithubPullRequestsConfig),
    GitlabMergeRequests(GitlabMergeRequestsConfig),
    Campfire(CampfireConfig),
}

impl ServiceConfig {
    pub fn provider_name(&self) -> &'static str {
        match self {
            Self::GithubPullRequests(_) => herald_github::GITHUB_PROVIDER_NAME,
            Self::GitlabMergeRequests(_) => herald_gitlab::GITLAB_PROVIDER_NAME,
            Self::Campfire(_) => herald_campfire::CAMPFIRE_PROVIDER_NAME,
        }
    }
}

pub fn parse_service_config(raw: &str) -> Result<ServiceConfig> {
    toml::from_str(raw).context("failed to parse service config")
}

pub fn load_service_config(path: &Path) -> Result<ServiceConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read service config {}", path.display()))?;
    parse_service_config(&raw).with_context(|| format!("invalid service config {}", path.display()))
}

/// Validates the config and builds the matching service.
pub fn build_service(config: &ServiceConfig) -> Result<Box<dyn Service>> {
    let service: Box<dyn Service> = match config {
        ServiceConfig::GithubPullRequests(config) => Box::new(PullRequestService::new(
            GithubPullRequests::new(config).context("invalid github_pull_requests config")?,
        )),
        ServiceConfig::GitlabMergeRequests(config) => Box::new(PullRequestService::new(
            GitlabMergeRequests::new(config).context("invalid gitlab_merge_requests config")?,
        )),
        ServiceConfig::Campfire(config) => {
            Box::new(CampfireService::new(config).context("invalid campfire config")?)
        }
    };
    tracing::debug!(
        provider = config.provider_name(),
        title = service.title(),
        "service configured"
    );
    Ok(service)
}

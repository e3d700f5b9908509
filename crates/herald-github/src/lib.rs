//! GitHub pull request provider for Herald.

pub mod github_config;
pub mod github_pull_requests;

pub use github_config::{GithubPullRequestsConfig, DEFAULT_GITHUB_API_BASE};
pub use github_pull_requests::{GithubPullRequests, GITHUB_PROVIDER_NAME, GITHUB_PROVIDER_TITLE};

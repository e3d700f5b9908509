//! GitLab merge request provider for Herald.

pub mod gitlab_config;
pub mod gitlab_merge_requests;

pub use gitlab_config::{GitlabMergeRequestsConfig, DEFAULT_GITLAB_BASE};
pub use gitlab_merge_requests::{
    project_path_from_git_url, GitlabMergeRequests, GITLAB_PROVIDER_NAME, GITLAB_PROVIDER_TITLE,
};

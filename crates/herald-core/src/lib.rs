//! Status-reporting decision engine for Herald.
//!
//! Classifies pipeline events into reporting actions, probes provider
//! credentials before trusting them, and renders the text collaborators
//! read. Provider crates plug in through [`PullRequestProvider`] and
//! [`Service`].
//!
//! ```rust
//! use herald_core::PullRequestPresenter;
//!
//! let presenter = PullRequestPresenter::new(Some(2), Some(1), Some(87.0), Some(-1.25));
//! assert_eq!(
//!     presenter.success_message(),
//!     "Code Climate found 2 new issues and 1 fixed issue."
//! );
//! assert_eq!(presenter.coverage_message(), "87% test coverage (-1.25%)");
//! ```

pub mod capability_probe;
pub mod provider_contract;
pub mod provider_http;
pub mod pull_request_config;
pub mod pull_request_dispatch;
pub mod pull_request_presenter;
pub mod pull_request_service;
pub mod service_error;
pub mod service_event;
pub mod service_outcome;
pub mod welcome_comment;

#[cfg(test)]
mod test_support;

pub use capability_probe::{
    classify_status_probe, run_capability_test, CapabilityReport, CommentCapability,
};
pub use provider_contract::{
    CommentSupport, ProviderDescriptor, PullRequestProvider, ReportedStatus, Service,
    StatusUpdate,
};
pub use provider_http::{
    join_endpoint, ProviderAuth, ProviderError, ProviderHttpClient, ProviderResponse,
};
pub use pull_request_config::{require_config_value, ConfigError, PullRequestSettings};
pub use pull_request_presenter::PullRequestPresenter;
pub use pull_request_service::PullRequestService;
pub use service_error::ServiceError;
pub use service_event::{
    CoverageEvent, LifecycleState, PullRequestEvent, QualityEvent, RepositoryRef, ServiceEvent,
    TestEvent, Vulnerability, VulnerabilityEvent, WelcomeCommentEvent, NEUTRAL_COMMIT_SHA,
};
pub use service_outcome::ServiceOutcome;

use crate::capability_probe::run_capability_test;
use crate::provider_contract::{PullRequestProvider, Service};
use crate::pull_request_dispatch::{dispatch_pull_request, dispatch_pull_request_coverage};
use crate::service_error::ServiceError;
use crate::service_event::ServiceEvent;
use crate::service_outcome::ServiceOutcome;
use crate::welcome_comment::post_welcome_comment;

/// Routes events to the pull request engine for one configured provider.
pub struct PullRequestService<P> {
    provider: P,
}

impl<P: PullRequestProvider> PullRequestService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P: PullRequestProvider> Service for PullRequestService<P> {
    fn title(&self) -> &'static str {
        self.provider.descriptor().title
    }

    fn receive(&self, event: &ServiceEvent) -> Result<ServiceOutcome, ServiceError> {
        tracing::debug!(
            provider = self.provider.descriptor().name,
            event = event.name(),
            "pull request service received event"
        );
        match event {
            ServiceEvent::Test(test) => run_capability_test(&self.provider, test),
            ServiceEvent::PullRequest(pull_request) => {
                dispatch_pull_request(&self.provider, pull_request)
            }
            ServiceEvent::PullRequestCoverage(pull_request) => {
                dispatch_pull_request_coverage(&self.provider, pull_request)
            }
            ServiceEvent::PullRequestWelcomeComment(welcome) => {
                post_welcome_comment(&self.provider, welcome)
            }
            ServiceEvent::Coverage(_)
            | ServiceEvent::Quality(_)
            | ServiceEvent::Vulnerability(_)
            | ServiceEvent::Unrecognized => Ok(ServiceOutcome::nothing_happened()),
        }
    }
}

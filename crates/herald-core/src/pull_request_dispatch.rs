//! Lifecycle state to status-update dispatch.

use crate::provider_contract::{PullRequestProvider, ReportedStatus, StatusUpdate};
use crate::pull_request_presenter::PullRequestPresenter;
use crate::service_error::ServiceError;
use crate::service_event::{LifecycleState, PullRequestEvent};
use crate::service_outcome::ServiceOutcome;

/// Picks the reported status and description for a known lifecycle state.
pub fn status_action(
    state: LifecycleState,
    event: &PullRequestEvent,
    presenter: &PullRequestPresenter,
) -> (ReportedStatus, String) {
    match state {
        LifecycleState::Pending => (
            ReportedStatus::Pending,
            event
                .explicit_message()
                .unwrap_or(presenter.pending_message())
                .to_string(),
        ),
        LifecycleState::Success => (ReportedStatus::Success, presenter.success_message()),
        LifecycleState::Failure => (ReportedStatus::Failure, presenter.success_message()),
        LifecycleState::Skipped => (
            ReportedStatus::Success,
            presenter.skipped_message().to_string(),
        ),
        LifecycleState::Error => (
            ReportedStatus::Error,
            event
                .explicit_message()
                .unwrap_or(presenter.error_message())
                .to_string(),
        ),
    }
}

fn parsed_state(event: &PullRequestEvent) -> Option<LifecycleState> {
    event.state.as_deref().and_then(LifecycleState::parse)
}

pub fn dispatch_pull_request<P>(
    provider: &P,
    event: &PullRequestEvent,
) -> Result<ServiceOutcome, ServiceError>
where
    P: PullRequestProvider + ?Sized,
{
    let Some(state) = parsed_state(event) else {
        tracing::debug!(
            provider = provider.descriptor().name,
            state = event.state.as_deref().unwrap_or("<none>"),
            "ignoring pull request event with unknown state"
        );
        return Ok(ServiceOutcome::unknown_state());
    };
    let presenter = PullRequestPresenter::from_event(event);
    let (status, description) = status_action(state, event, &presenter);
    let update = StatusUpdate {
        state: status,
        description: Some(description),
        context: Some(provider.settings().context.clone()),
        target_url: event.details_url.clone(),
    };
    post_status(provider, event, &update)
}

/// Coverage results only report on `success`.
pub fn dispatch_pull_request_coverage<P>(
    provider: &P,
    event: &PullRequestEvent,
) -> Result<ServiceOutcome, ServiceError>
where
    P: PullRequestProvider + ?Sized,
{
    if parsed_state(event) != Some(LifecycleState::Success) {
        tracing::debug!(
            provider = provider.descriptor().name,
            state = event.state.as_deref().unwrap_or("<none>"),
            "ignoring coverage event outside success state"
        );
        return Ok(ServiceOutcome::unknown_state());
    }
    let presenter = PullRequestPresenter::from_event(event);
    let update = StatusUpdate {
        state: ReportedStatus::Success,
        description: Some(presenter.coverage_message()),
        context: Some(provider.settings().coverage_context()),
        target_url: event.details_url.clone(),
    };
    post_status(provider, event, &update)
}

fn post_status<P>(
    provider: &P,
    event: &PullRequestEvent,
    update: &StatusUpdate,
) -> Result<ServiceOutcome, ServiceError>
where
    P: PullRequestProvider + ?Sized,
{
    let commit_sha = event.commit_sha()?;
    let endpoint_url = provider.status_url(&event.repository(), commit_sha)?;
    let body = provider.status_body(update);
    tracing::debug!(
        provider = provider.descriptor().name,
        endpoint_url = endpoint_url.as_str(),
        state = provider.status_keyword(update.state),
        "posting pull request status"
    );
    let result = provider.client().post_json(&endpoint_url, &body);
    Ok(ServiceOutcome::from_delivery(result, body))
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::{dispatch_pull_request, dispatch_pull_request_coverage, status_action};
    use crate::provider_contract::ReportedStatus;
    use crate::pull_request_config::PullRequestSettings;
    use crate::pull_request_presenter::{
        PullRequestPresenter, ERROR_MESSAGE, NO_ISSUES_MESSAGE, PENDING_MESSAGE, SKIPPED_MESSAGE,
    };
    use crate::service_error::ServiceError;
    use crate::service_event::{IssueComparisonCounts, LifecycleState, PullRequestEvent};
    use crate::test_support::FakeProvider;

    fn event(state: &str) -> PullRequestEvent {
        PullRequestEvent {
            state: Some(state.to_string()),
            github_slug: Some("pbrisbin/foo".to_string()),
            commit_sha: Some("abc123".to_string()),
            number: Some(1),
            details_url: Some("http://example.com/details".to_string()),
            issue_comparison_counts: Some(IssueComparisonCounts {
                new: Some(2),
                fixed: Some(1),
            }),
            ..PullRequestEvent::default()
        }
    }

    fn action(state: LifecycleState, event: &PullRequestEvent) -> (ReportedStatus, String) {
        status_action(state, event, &PullRequestPresenter::from_event(event))
    }

    #[test]
    fn unit_status_action_follows_state_table() {
        let base = PullRequestEvent::default();
        assert_eq!(
            action(LifecycleState::Pending, &base),
            (ReportedStatus::Pending, PENDING_MESSAGE.to_string())
        );
        assert_eq!(
            action(LifecycleState::Success, &base),
            (ReportedStatus::Success, NO_ISSUES_MESSAGE.to_string())
        );
        assert_eq!(
            action(LifecycleState::Failure, &base),
            (ReportedStatus::Failure, NO_ISSUES_MESSAGE.to_string())
        );
        assert_eq!(
            action(LifecycleState::Skipped, &base),
            (ReportedStatus::Success, SKIPPED_MESSAGE.to_string())
        );
        assert_eq!(
            action(LifecycleState::Error, &base),
            (ReportedStatus::Error, ERROR_MESSAGE.to_string())
        );
    }

    #[test]
    fn unit_explicit_message_overrides_pending_and_error_only() {
        let with_message = PullRequestEvent {
            message: Some("descriptive message".to_string()),
            ..PullRequestEvent::default()
        };
        assert_eq!(
            action(LifecycleState::Error, &with_message).1,
            "descriptive message"
        );
        assert_eq!(
            action(LifecycleState::Pending, &with_message).1,
            "descriptive message"
        );
        assert_eq!(
            action(LifecycleState::Skipped, &with_message).1,
            SKIPPED_MESSAGE
        );
        assert_eq!(
            action(LifecycleState::Success, &with_message).1,
            NO_ISSUES_MESSAGE
        );
    }

    #[test]
    fn functional_success_posts_status_with_default_context() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/pbrisbin/foo/statuses/abc123")
                .header("authorization", "token 123")
                .json_body(json!({
                    "state": "success",
                    "description": "Code Climate found 2 new issues and 1 fixed issue.",
                    "context": "codeclimate",
                    "target_url": "http://example.com/details"
                }));
            then.status(201).json_body(json!({"id": 2}));
        });

        let provider = FakeProvider::new(&server.base_url(), false);
        let outcome = dispatch_pull_request(&provider, &event("success")).expect("dispatch");
        mock.assert();
        assert!(outcome.ok());
        assert_eq!(outcome.message(), "Success");
        assert_eq!(outcome.status(), Some(201));
    }

    #[test]
    fn functional_configured_context_is_honored() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/pbrisbin/foo/statuses/abc123")
                .body_includes("\"context\":\"sup\"")
                .body_includes("\"state\":\"failure\"");
            then.status(201);
        });

        let settings = PullRequestSettings {
            context: "sup".to_string(),
            ..PullRequestSettings::default()
        };
        let provider = FakeProvider::with_settings(&server.base_url(), settings);
        let outcome = dispatch_pull_request(&provider, &event("failure")).expect("dispatch");
        mock.assert();
        assert!(outcome.ok());
    }

    #[test]
    fn regression_unknown_state_makes_no_network_call() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST);
            then.status(201);
        });
        let provider = FakeProvider::new(&server.base_url(), false);
        let bare = PullRequestEvent {
            state: Some("unknown".to_string()),
            ..PullRequestEvent::default()
        };
        let outcome = dispatch_pull_request(&provider, &bare).expect("dispatch");
        assert!(!outcome.ok());
        assert_eq!(outcome.message(), "Unknown state");
        mock.assert_calls(0);
    }

    #[test]
    fn regression_missing_commit_sha_is_missing_field() {
        let provider = FakeProvider::new("http://127.0.0.1:9", false);
        let mut pending = event("pending");
        pending.commit_sha = None;
        let error = dispatch_pull_request(&provider, &pending).expect_err("sha required");
        assert!(matches!(error, ServiceError::MissingField("commit_sha")));
    }

    #[test]
    fn functional_coverage_posts_coverage_context() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/pbrisbin/foo/statuses/abc123")
                .json_body(json!({
                    "state": "success",
                    "description": "87% test coverage (+2%)",
                    "context": "codeclimate/coverage",
                    "target_url": "http://example.com/details"
                }));
            then.status(201);
        });

        let provider = FakeProvider::new(&server.base_url(), false);
        let mut coverage = event("success");
        coverage.covered_percent = Some(87.0);
        coverage.covered_percent_delta = Some(2.0);
        let outcome = dispatch_pull_request_coverage(&provider, &coverage).expect("dispatch");
        mock.assert();
        assert!(outcome.ok());
    }

    #[test]
    fn regression_coverage_outside_success_is_unknown_state() {
        let provider = FakeProvider::new("http://127.0.0.1:9", false);
        for state in ["pending", "failure", "error", "skipped", "bogus"] {
            let outcome =
                dispatch_pull_request_coverage(&provider, &event(state)).expect("dispatch");
            assert!(!outcome.ok(), "{state}");
            assert_eq!(outcome.message(), "Unknown state");
        }
    }

    #[test]
    fn regression_delivery_failure_is_encoded_in_outcome() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/repos/pbrisbin/foo/statuses/abc123");
            then.status(404).body("Not Found");
        });
        let provider = FakeProvider::new(&server.base_url(), false);
        let outcome = dispatch_pull_request(&provider, &event("pending")).expect("dispatch");
        assert!(!outcome.ok());
        assert_eq!(outcome.message(), "API request unsuccessful (404)");

        let unreachable = FakeProvider::new("http://127.0.0.1:9", false);
        let outcome = dispatch_pull_request(&unreachable, &event("pending")).expect("dispatch");
        assert!(!outcome.ok());
        assert!(outcome.message().starts_with("Service unavailable: "));
    }
}

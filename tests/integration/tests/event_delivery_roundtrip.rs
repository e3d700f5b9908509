use herald_campfire::{CampfireConfig, CampfireService};
use herald_core::{PullRequestService, Service, ServiceEvent, NEUTRAL_COMMIT_SHA};
use herald_github::{GithubPullRequests, GithubPullRequestsConfig};
use herald_gitlab::{GitlabMergeRequests, GitlabMergeRequestsConfig};
use httpmock::prelude::*;
use serde_json::json;

fn github_service(base_url: &str, welcome_comment_enabled: bool) -> Box<dyn Service> {
    let mut config = GithubPullRequestsConfig::new("123");
    config.base_url = base_url.to_string();
    config.settings.welcome_comment_enabled = welcome_comment_enabled;
    Box::new(PullRequestService::new(
        GithubPullRequests::new(&config).expect("github provider"),
    ))
}

fn gitlab_service(base_url: &str) -> Box<dyn Service> {
    let mut config = GitlabMergeRequestsConfig::new("abc");
    config.base_url = base_url.to_string();
    Box::new(PullRequestService::new(
        GitlabMergeRequests::new(&config).expect("gitlab provider"),
    ))
}

fn event(raw: serde_json::Value) -> ServiceEvent {
    ServiceEvent::parse_json(&raw.to_string()).expect("event")
}

#[test]
fn integration_github_pull_request_lifecycle_reports_each_state() {
    let server = MockServer::start();
    let service = github_service(&server.base_url(), false);
    let cases = [
        ("pending", "pending", "Code Climate is analyzing this code."),
        (
            "success",
            "success",
            "Code Climate found 2 new issues and 1 fixed issue.",
        ),
        (
            "failure",
            "failure",
            "Code Climate found 2 new issues and 1 fixed issue.",
        ),
        (
            "skipped",
            "success",
            "Code Climate has skipped analysis of this commit.",
        ),
        (
            "error",
            "error",
            "Code Climate encountered an error attempting to analyze this pull request.",
        ),
    ];
    for (state, reported, description) in cases {
        let mut mock = server.mock(|when, then| {
            when.method(POST)
                .path("/repos/pbrisbin/foo/statuses/abc123")
                .json_body(json!({
                    "state": reported,
                    "description": description,
                    "context": "codeclimate",
                    "target_url": "https://codeclimate.com/pulls/1"
                }));
            then.status(201);
        });
        let outcome = service
            .receive(&event(json!({
                "name": "pull_request",
                "state": state,
                "github_slug": "pbrisbin/foo",
                "commit_sha": "abc123",
                "number": 1,
                "details_url": "https://codeclimate.com/pulls/1",
                "issue_comparison_counts": {"new": 2, "fixed": 1}
            })))
            .expect("receive");
        mock.assert();
        mock.delete();
        assert!(outcome.ok(), "{state}");
    }
}

#[test]
fn integration_github_test_then_welcome_comment() {
    let server = MockServer::start();
    let status = server.mock(|when, then| {
        when.method(POST)
            .path(format!("/repos/pbrisbin/foo/statuses/{NEUTRAL_COMMIT_SHA}"));
        then.status(422);
    });
    let user = server.mock(|when, then| {
        when.method(GET).path("/user");
        then.status(200).header("x-oauth-scopes", "gist, user, repo");
    });
    let comment = server.mock(|when, then| {
        when.method(POST)
            .path("/repos/pbrisbin/foo/issues/4/comments")
            .body_includes("Hey, @octocat-- ")
            .body_includes("Quick note: By default");
        then.status(201);
    });

    let service = github_service(&server.base_url(), true);
    let outcome = service
        .receive(&event(json!({"name": "test", "github_slug": "pbrisbin/foo"})))
        .expect("test");
    assert!(outcome.ok());
    assert_eq!(outcome.message(), "Access token is valid.");

    let outcome = service
        .receive(&event(json!({
            "name": "pull_request_welcome_comment",
            "github_slug": "pbrisbin/foo",
            "number": 4,
            "author_username": "octocat",
            "author_is_site_admin": true,
            "pull_request_integration_edit_url": "https://codeclimate.com/repos/1/settings"
        })))
        .expect("welcome comment");
    assert!(outcome.ok());
    status.assert_calls(1);
    user.assert_calls(1);
    comment.assert_calls(1);
}

#[test]
fn integration_gitlab_coverage_uses_running_keywords_and_coverage_name() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).json_body(json!({
            "state": "success",
            "name": "codeclimate/coverage",
            "description": "90.25% test coverage (-1.5%)"
        }));
        then.status(201);
    });
    let outcome = gitlab_service(&server.base_url())
        .receive(&event(json!({
            "name": "pull_request_coverage",
            "state": "success",
            "git_url": "git@gitlab.com:group/project.git",
            "commit_sha": "abc123",
            "covered_percent": 90.25,
            "covered_percent_delta": -1.5
        })))
        .expect("receive");
    mock.assert();
    assert_eq!(
        outcome.endpoint_url(),
        Some(
            format!(
                "{}/api/v4/projects/group%2Fproject/statuses/abc123",
                server.base_url()
            )
            .as_str()
        )
    );
}

#[test]
fn integration_campfire_relays_vulnerabilities() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/room/123/speak.json")
            .json_body(json!({
                "message": {
                    "body": "[Code Climate][Rails] 2 new critical issues found. Details: https://codeclimate.com/repos/1/vulnerabilities"
                }
            }));
        then.status(200);
    });
    let service = CampfireService::new(&CampfireConfig {
        token: "token".to_string(),
        subdomain: "sub".to_string(),
        room_id: "123".to_string(),
        base_url: Some(server.base_url()),
        ..CampfireConfig::default()
    })
    .expect("campfire");
    let outcome = service
        .receive(&event(json!({
            "name": "vulnerability",
            "repo_name": "Rails",
            "warning_type": "critical",
            "vulnerabilities": [
                {"warning_type": "unused", "location": "unused"},
                {"warning_type": "unused", "location": "unused"}
            ],
            "details_url": "https://codeclimate.com/repos/1/vulnerabilities"
        })))
        .expect("receive");
    mock.assert();
    assert!(outcome.ok());
}

#[test]
fn regression_unknown_state_never_reaches_any_provider() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(201);
    });
    for service in [
        github_service(&server.base_url(), true),
        gitlab_service(&server.base_url()),
    ] {
        let outcome = service
            .receive(&event(json!({"name": "pull_request", "state": "queued"})))
            .expect("receive");
        assert!(!outcome.ok());
        assert_eq!(outcome.message(), "Unknown state");
    }
    mock.assert_calls(0);
}

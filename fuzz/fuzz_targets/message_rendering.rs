#![no_main]

use herald_campfire::campfire_formatter::{
    format_coverage, format_quality, format_test, format_vulnerability,
};
use herald_core::{PullRequestPresenter, ServiceEvent};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let Ok(event) = ServiceEvent::parse_json(&raw) else {
        return;
    };
    match &event {
        ServiceEvent::PullRequest(pull_request) | ServiceEvent::PullRequestCoverage(pull_request) => {
            let presenter = PullRequestPresenter::from_event(pull_request);
            assert!(presenter.coverage_message().ends_with("test coverage")
                || presenter.coverage_message().ends_with("%)"));
            assert!(presenter.success_message().ends_with('.'));
        }
        ServiceEvent::Test(test) => {
            let _ = format_test(test.repo_name.as_deref());
        }
        ServiceEvent::Coverage(coverage) => {
            let _ = format_coverage(coverage);
        }
        ServiceEvent::Quality(quality) => {
            let _ = format_quality(quality);
        }
        ServiceEvent::Vulnerability(vulnerability) => {
            let _ = format_vulnerability(vulnerability);
        }
        ServiceEvent::PullRequestWelcomeComment(_) | ServiceEvent::Unrecognized => {}
    }
});

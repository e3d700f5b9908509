//! GitHub-shaped provider used by this crate's unit tests.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use crate::provider_contract::{
    CommentSupport, ProviderDescriptor, PullRequestProvider, ReportedStatus,
};
use crate::provider_http::{join_endpoint, ProviderAuth, ProviderError, ProviderHttpClient};
use crate::pull_request_config::PullRequestSettings;
use crate::service_error::ServiceError;
use crate::service_event::{RepositoryRef, NEUTRAL_COMMIT_SHA};

/// Answers one request with a 2xx whose body stops short of its
/// `content-length`, then closes the connection.
pub(crate) fn serve_truncated_success() -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let base_url = format!("http://{}", listener.local_addr().expect("addr"));
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut request = Vec::new();
        let mut chunk = [0_u8; 1024];
        while !request_complete(&request) {
            let read = stream.read(&mut chunk).expect("read request");
            if read == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..read]);
        }
        stream
            .write_all(
                b"HTTP/1.1 201 Created\r\ncontent-type: application/json\r\ncontent-length: 64\r\n\r\n{\"id\":",
            )
            .expect("write response");
        stream.flush().expect("flush");
    });
    (base_url, server)
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    body.len() >= content_length
}

pub(crate) fn neutral_status_path(slug: &str) -> String {
    format!("/repos/{slug}/statuses/{NEUTRAL_COMMIT_SHA}")
}

pub(crate) struct FakeProvider {
    base_url: String,
    settings: PullRequestSettings,
    client: ProviderHttpClient,
}

impl FakeProvider {
    pub(crate) fn new(base_url: &str, welcome_comment_enabled: bool) -> Self {
        Self::with_settings(
            base_url,
            PullRequestSettings {
                welcome_comment_enabled,
                ..PullRequestSettings::default()
            },
        )
    }

    pub(crate) fn with_settings(base_url: &str, settings: PullRequestSettings) -> Self {
        let client = ProviderHttpClient::new(
            ProviderAuth::Header {
                name: "authorization",
                value: "token 123".to_string(),
            },
            2_000,
        )
        .expect("fake provider client");
        Self {
            base_url: base_url.to_string(),
            settings,
            client,
        }
    }
}

impl PullRequestProvider for FakeProvider {
    fn descriptor(&self) -> ProviderDescriptor {
        ProviderDescriptor {
            name: "fake_pull_requests",
            title: "Fake Pull Requests",
            status_probe_code: 422,
        }
    }

    fn settings(&self) -> &PullRequestSettings {
        &self.settings
    }

    fn client(&self) -> &ProviderHttpClient {
        &self.client
    }

    fn status_keyword(&self, status: ReportedStatus) -> &'static str {
        status.as_str()
    }

    fn status_url(
        &self,
        repository: &RepositoryRef<'_>,
        commit_sha: &str,
    ) -> Result<String, ServiceError> {
        let slug = repository.github_slug()?;
        Ok(join_endpoint(
            &self.base_url,
            &format!("repos/{slug}/statuses/{commit_sha}"),
        ))
    }

    fn comments(&self) -> Option<&dyn CommentSupport> {
        Some(self)
    }
}

impl CommentSupport for FakeProvider {
    fn comment_url(
        &self,
        repository: &RepositoryRef<'_>,
        number: u64,
    ) -> Result<String, ServiceError> {
        let slug = repository.github_slug()?;
        Ok(join_endpoint(
            &self.base_url,
            &format!("repos/{slug}/issues/{number}/comments"),
        ))
    }

    fn probe_comment_write(&self) -> Result<bool, ProviderError> {
        let response = self.client.get(&join_endpoint(&self.base_url, "user"))?;
        Ok(response
            .header("x-oauth-scopes")
            .unwrap_or_default()
            .split(',')
            .any(|scope| scope.trim() == "repo"))
    }
}

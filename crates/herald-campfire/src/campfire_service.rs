//! Relays chat events into a Campfire room.

use herald_core::{
    ConfigError, ProviderAuth, ProviderHttpClient, Service, ServiceError, ServiceEvent,
    ServiceOutcome,
};
use serde_json::json;

use crate::campfire_config::{CampfireConfig, CampfireRoom};
use crate::campfire_formatter::{format_coverage, format_quality, format_test, format_vulnerability};

pub const CAMPFIRE_PROVIDER_NAME: &str = "campfire";
pub const CAMPFIRE_TITLE: &str = "Campfire";
const CAMPFIRE_BASIC_AUTH_PASSWORD: &str = "X";

#[derive(Debug, Clone)]
pub struct CampfireService {
    room: CampfireRoom,
    client: ProviderHttpClient,
}

impl CampfireService {
    pub fn new(config: &CampfireConfig) -> Result<Self, ConfigError> {
        let room = config.resolve_room()?;
        let client = ProviderHttpClient::new(
            ProviderAuth::Basic {
                username: room.token.clone(),
                password: CAMPFIRE_BASIC_AUTH_PASSWORD.to_string(),
            },
            room.request_timeout_ms,
        )
        .map_err(|error| ConfigError::InvalidValue {
            field: "token",
            detail: error.to_string(),
        })?;
        Ok(Self { room, client })
    }

    pub fn speak_url(&self) -> &str {
        &self.room.speak_url
    }

    fn speak(&self, message: String) -> ServiceOutcome {
        tracing::debug!(
            provider = CAMPFIRE_PROVIDER_NAME,
            endpoint_url = self.room.speak_url.as_str(),
            "posting campfire message"
        );
        let body = json!({ "message": { "body": message } });
        let result = self.client.post_json(&self.room.speak_url, &body);
        ServiceOutcome::from_delivery(result, body)
    }
}

impl Service for CampfireService {
    fn title(&self) -> &'static str {
        CAMPFIRE_TITLE
    }

    fn receive(&self, event: &ServiceEvent) -> Result<ServiceOutcome, ServiceError> {
        let message = match event {
            ServiceEvent::Test(test) => format_test(test.repo_name.as_deref())?,
            ServiceEvent::Coverage(coverage) => format_coverage(coverage)?,
            ServiceEvent::Quality(quality) => format_quality(quality)?,
            ServiceEvent::Vulnerability(vulnerability) => format_vulnerability(vulnerability)?,
            ServiceEvent::PullRequest(_)
            | ServiceEvent::PullRequestCoverage(_)
            | ServiceEvent::PullRequestWelcomeComment(_)
            | ServiceEvent::Unrecognized => {
                tracing::debug!(
                    provider = CAMPFIRE_PROVIDER_NAME,
                    event = event.name(),
                    "campfire ignores event"
                );
                return Ok(ServiceOutcome::nothing_happened());
            }
        };
        Ok(self.speak(message))
    }
}

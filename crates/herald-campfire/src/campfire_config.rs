use herald_core::provider_http::DEFAULT_REQUEST_TIMEOUT_MS;
use herald_core::{join_endpoint, require_config_value, ConfigError};
use serde::{Deserialize, Serialize};

fn default_request_timeout_ms() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Room credentials for the Campfire chat relay.
pub struct CampfireConfig {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub subdomain: String,
    #[serde(default)]
    pub room_id: String,
    /// Overrides `https://<subdomain>.campfirenow.com`.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for CampfireConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            subdomain: String::new(),
            room_id: String::new(),
            base_url: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Validated room target.
pub struct CampfireRoom {
    pub token: String,
    pub speak_url: String,
    pub request_timeout_ms: u64,
}

impl CampfireConfig {
    pub fn resolve_room(&self) -> Result<CampfireRoom, ConfigError> {
        let token = require_config_value(&self.token, "token")?;
        let subdomain = require_config_value(&self.subdomain, "subdomain")?;
        let room_id = require_config_value(&self.room_id, "room_id")?;
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "request_timeout_ms",
                detail: "must be greater than 0".to_string(),
            });
        }
        let base_url = match self.base_url.as_deref() {
            Some(raw) => require_config_value(raw, "base_url")?,
            None => format!("https://{subdomain}.campfirenow.com"),
        };
        Ok(CampfireRoom {
            token,
            speak_url: join_endpoint(&base_url, &format!("room/{room_id}/speak.json")),
            request_timeout_ms: self.request_timeout_ms,
        })
    }
}

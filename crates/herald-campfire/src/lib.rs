//! Campfire chat-room relay for Herald.

pub mod campfire_config;
pub mod campfire_formatter;
pub mod campfire_service;

pub use campfire_config::{CampfireConfig, CampfireRoom};
pub use campfire_service::{CampfireService, CAMPFIRE_PROVIDER_NAME, CAMPFIRE_TITLE};

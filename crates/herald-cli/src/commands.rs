use std::io::Read;
use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use herald_core::{ServiceEvent, ServiceOutcome, TestEvent};

use crate::cli_args::{Cli, HeraldCommand};
use crate::service_config::{build_service, load_service_config};

const STDIN_PATH: &str = "-";

pub(crate) fn run_cli(cli: &Cli) -> Result<ServiceOutcome> {
    let config_path = cli
        .config
        .as_deref()
        .ok_or_else(|| anyhow!("--config (or HERALD_CONFIG) is required"))?;
    let config = load_service_config(config_path)?;
    let service = build_service(&config)?;

    let event = match &cli.command {
        HeraldCommand::Receive { event } => read_event(event)?,
        HeraldCommand::Test {
            event: Some(event), ..
        } => {
            let event = read_event(event)?;
            if !matches!(event, ServiceEvent::Test(_)) {
                bail!("expected a `test` event, got `{}`", event.name());
            }
            event
        }
        HeraldCommand::Test {
            event: None,
            github_slug,
            git_url,
            repo_name,
        } => ServiceEvent::Test(TestEvent {
            github_slug: github_slug.clone(),
            git_url: git_url.clone(),
            repo_name: repo_name.clone(),
        }),
    };

    tracing::debug!(
        provider = config.provider_name(),
        event = event.name(),
        "dispatching event"
    );
    service
        .receive(&event)
        .with_context(|| format!("{} failed to handle `{}` event", service.title(), event.name()))
}

fn read_event(path: &Path) -> Result<ServiceEvent> {
    let raw = if path.as_os_str() == STDIN_PATH {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("failed to read event from stdin")?;
        raw
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read event {}", path.display()))?
    };
    ServiceEvent::parse_json(&raw).with_context(|| format!("invalid event {}", path.display()))
}

pub(crate) fn render_outcome(outcome: &ServiceOutcome, pretty: bool) -> Result<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(outcome)
    } else {
        serde_json::to_string(outcome)
    };
    rendered.context("failed to serialize outcome")
}

//! One-line room messages for chat events.

use herald_core::service_event::require_field;
use herald_core::{CoverageEvent, QualityEvent, ServiceError, VulnerabilityEvent};

pub const TEST_MESSAGE: &str = "This is a test of the Campfire service hook";
const IMPROVED_EMOJI: &str = ":sunny:";
const DECLINED_EMOJI: &str = ":umbrella:";

pub fn message_prefix(repo_name: Option<&str>) -> Result<String, ServiceError> {
    let repo_name = require_field(repo_name, "repo_name")?;
    Ok(format!("[Code Climate][{repo_name}]"))
}

pub fn format_test(repo_name: Option<&str>) -> Result<String, ServiceError> {
    Ok(format!("{} {TEST_MESSAGE}", message_prefix(repo_name)?))
}

pub fn format_coverage(event: &CoverageEvent) -> Result<String, ServiceError> {
    let prefix = message_prefix(event.repo_name.as_deref())?;
    let covered_percent = event
        .covered_percent
        .ok_or(ServiceError::MissingField("covered_percent"))?;
    let delta = event
        .covered_percent_delta
        .ok_or(ServiceError::MissingField("covered_percent_delta"))?;
    let details_url = require_field(event.details_url.as_deref(), "details_url")?;

    let improved = delta >= 0.0;
    let (emoji, verb, sign) = if improved {
        (IMPROVED_EMOJI, "improved", "+")
    } else {
        (DECLINED_EMOJI, "declined", "")
    };
    Ok(format!(
        "{prefix} {emoji} Test coverage has {verb} to {}% ({sign}{}%). ({details_url})",
        format_float(covered_percent),
        format_float(delta),
    ))
}

pub fn format_quality(event: &QualityEvent) -> Result<String, ServiceError> {
    let prefix = message_prefix(event.repo_name.as_deref())?;
    let constant_name = require_field(event.constant_name.as_deref(), "constant_name")?;
    let rating = require_field(event.rating.as_deref(), "rating")?;
    let previous_rating = require_field(event.previous_rating.as_deref(), "previous_rating")?;
    let details_url = require_field(event.details_url.as_deref(), "details_url")?;

    // Letter grades: earlier in the alphabet is better.
    let (emoji, verb) = if rating < previous_rating {
        (IMPROVED_EMOJI, "improved")
    } else {
        (DECLINED_EMOJI, "declined")
    };
    Ok(format!(
        "{prefix} {emoji} {constant_name} has {verb} from {} {previous_rating} to {} {rating}. ({details_url})",
        rating_article(previous_rating),
        rating_article(rating),
    ))
}

pub fn format_vulnerability(event: &VulnerabilityEvent) -> Result<String, ServiceError> {
    let prefix = message_prefix(event.repo_name.as_deref())?;
    let details_url = require_field(event.details_url.as_deref(), "details_url")?;
    let summary = match event.vulnerabilities.as_slice() {
        [single] => {
            let warning_type = require_field(single.warning_type.as_deref(), "warning_type")?;
            match single.location.as_deref().map(str::trim) {
                Some(location) if !location.is_empty() => {
                    format!("New {warning_type} issue found in {location}.")
                }
                _ => format!("New {warning_type} issue found."),
            }
        }
        many => {
            let warning_type = require_field(event.warning_type.as_deref(), "warning_type")?;
            format!("{} new {warning_type} issues found.", many.len())
        }
    };
    Ok(format!("{prefix} {summary} Details: {details_url}"))
}

fn rating_article(rating: &str) -> &'static str {
    match rating {
        "A" | "E" | "F" => "an",
        _ => "a",
    }
}

/// Renders a float the way a float literal reads: `90.2`, `-6.0`, `10.0`.
pub fn format_float(value: f64) -> String {
    format!("{value:?}")
}

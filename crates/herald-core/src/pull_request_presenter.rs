//! Human-readable pull request status text.
//!
//! Pure rendering: no I/O and no error paths. Absent counts render as zero
//! and an absent coverage delta renders as no change.

use crate::service_event::PullRequestEvent;

pub const ERROR_MESSAGE: &str =
    "Code Climate encountered an error attempting to analyze this pull request.";
pub const PENDING_MESSAGE: &str = "Code Climate is analyzing this code.";
pub const SKIPPED_MESSAGE: &str = "Code Climate has skipped analysis of this commit.";
pub const NO_ISSUES_MESSAGE: &str = "Code Climate didn't find any new or fixed issues.";

const GENERAL_FORMAT_PRECISION: usize = 6;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PullRequestPresenter {
    new_count: u64,
    fixed_count: u64,
    covered_percent: f64,
    covered_percent_delta: f64,
}

impl PullRequestPresenter {
    pub fn new(
        new_count: Option<u64>,
        fixed_count: Option<u64>,
        covered_percent: Option<f64>,
        covered_percent_delta: Option<f64>,
    ) -> Self {
        Self {
            new_count: new_count.unwrap_or(0),
            fixed_count: fixed_count.unwrap_or(0),
            covered_percent: covered_percent.unwrap_or(0.0),
            covered_percent_delta: covered_percent_delta.unwrap_or(0.0),
        }
    }

    pub fn from_event(event: &PullRequestEvent) -> Self {
        let counts = event.issue_comparison_counts.unwrap_or_default();
        Self::new(
            counts.new,
            counts.fixed,
            event.covered_percent,
            event.covered_percent_delta,
        )
    }

    pub fn error_message(&self) -> &'static str {
        ERROR_MESSAGE
    }

    pub fn pending_message(&self) -> &'static str {
        PENDING_MESSAGE
    }

    pub fn skipped_message(&self) -> &'static str {
        SKIPPED_MESSAGE
    }

    pub fn coverage_message(&self) -> String {
        let mut message = format!("{}% test coverage", format_percent(self.covered_percent));
        let delta = self.covered_percent_delta;
        if delta > 0.0 {
            message.push_str(&format!(" (+{}%)", format_percent(delta)));
        } else if delta < 0.0 {
            message.push_str(&format!(" ({}%)", format_percent(delta)));
        }
        message
    }

    pub fn success_message(&self) -> String {
        if self.new_count == 0 && self.fixed_count == 0 {
            return NO_ISSUES_MESSAGE.to_string();
        }
        let parts = [
            describe_issue_count(self.new_count, "new"),
            describe_issue_count(self.fixed_count, "fixed"),
        ]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();
        format!("Code Climate found {}.", to_sentence(&parts))
    }
}

fn describe_issue_count(count: u64, label: &str) -> Option<String> {
    if count == 0 {
        return None;
    }
    Some(format!(
        "{} {label} {}",
        format_delimited(count),
        pluralize("issue", count)
    ))
}

fn pluralize(word: &str, count: u64) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

/// Renders a percentage with at most two decimals and no trailing zeros.
pub fn format_percent(value: f64) -> String {
    let rounded = format!("{value:.2}");
    let rounded_value = rounded.parse::<f64>().unwrap_or(value);
    format_general(rounded_value)
}

/// Shortest of fixed/scientific notation with six significant digits and
/// trailing zeros removed, matching C's `%g`.
pub fn format_general(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    let scientific = format!("{:.*e}", GENERAL_FORMAT_PRECISION - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= GENERAL_FORMAT_PRECISION as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!(
            "{}e{sign}{:02}",
            strip_trailing_zeros(mantissa),
            exponent.abs()
        );
    }

    let decimals = (GENERAL_FORMAT_PRECISION as i32 - 1 - exponent).max(0) as usize;
    strip_trailing_zeros(&format!("{value:.decimals$}"))
}

fn strip_trailing_zeros(raw: &str) -> String {
    if !raw.contains('.') {
        return raw.to_string();
    }
    raw.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Groups digits in thousands: `1234567` becomes `1,234,567`.
pub fn format_delimited(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Joins items into an English list: `a`, `a and b`, `a, b, and c`.
pub fn to_sentence(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [leading @ .., last] => format!("{}, and {last}", leading.join(", ")),
    }
}

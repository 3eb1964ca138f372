//! Jira wiki-markup description for a result event.
//!
//! Request, response and metadata text is embedded as-is. Jira markup inside
//! those values (a stray `{code}` or `|`) is not escaped and will be
//! interpreted by the tracker.

use chrono::{DateTime, FixedOffset};

use crate::format::matched_template;
use crate::models::ResultEvent;

pub fn format_description(event: &ResultEvent) -> String {
    let mut description = String::new();

    description.push_str(&format!(
        "*Details*: *{}*  matched at {}\n\n",
        matched_template(event),
        event.host
    ));
    description.push_str(&format!("*Protocol*: {}\n\n", event.kind.to_uppercase()));
    description.push_str(&format!("*Full URL*: {}\n\n", event.matched));
    description.push_str(&format!(
        "*Timestamp*: {}\n\n",
        format_timestamp(&event.timestamp)
    ));

    description.push_str("*Template Information*\n\n| Key | Value |\n");
    for (key, value) in &event.info {
        description.push_str(&format!("| {key} | {value} |\n"));
    }

    description.push_str("\n*Request*\n\n{code}\n");
    description.push_str(&event.request);
    description.push_str("\n{code}\n\n*Response*\n\n{code}\n");
    description.push_str(&event.response);
    description.push_str("\n{code}\n\n");

    if !event.extracted_results.is_empty() || !event.metadata.is_empty() {
        description.push_str("*Extra Information*\n\n");
        if !event.extracted_results.is_empty() {
            description.push_str("*Extracted results*:\n\n");
            for result in &event.extracted_results {
                description.push_str(&format!("- {result}\n"));
            }
            description.push('\n');
        }
        if !event.metadata.is_empty() {
            description.push_str("*Metadata*:\n\n");
            for (key, value) in &event.metadata {
                description.push_str(&format!("- {key}: {value}\n"));
            }
            description.push('\n');
        }
    }

    description
}

/// Renders `Mon Jan 2 15:04:05 -0700 MST 2006`. Fixed-offset instants carry
/// no zone name, so the abbreviation is `UTC` for a zero offset and the
/// numeric offset otherwise.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    format!(
        "{} {} {}",
        timestamp.format("%a %b %-d %H:%M:%S %z"),
        zone_abbreviation(timestamp.offset()),
        timestamp.format("%Y")
    )
}

fn zone_abbreviation(offset: &FixedOffset) -> String {
    let seconds = offset.local_minus_utc();
    if seconds == 0 {
        return "UTC".to_string();
    }
    let sign = if seconds < 0 { '-' } else { '+' };
    let minutes = seconds.abs() / 60;
    format!("{sign}{:02}{:02}", minutes / 60, minutes % 60)
}

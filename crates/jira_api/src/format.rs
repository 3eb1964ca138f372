//! Short labels derived from a result event.

use crate::models::ResultEvent;

/// One-line issue title: `{name} ({template}) found on {host}`.
pub fn summary(event: &ResultEvent) -> String {
    let template = matched_template(event);
    let name = event
        .info
        .get("name")
        .map(ToString::to_string)
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| event.template_id.clone());
    format!("{name} ({template}) found on {}", event.host)
}

/// Template id qualified with the matcher and extractor that fired, when set.
pub fn matched_template(event: &ResultEvent) -> String {
    let mut template = event.template_id.clone();
    for part in [&event.matcher_name, &event.extractor_name] {
        if !part.is_empty() {
            template.push(':');
            template.push_str(part);
        }
    }
    template
}

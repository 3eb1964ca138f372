//! Scanner finding consumed by the reporter.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Represents one scanner finding as emitted on the scanner's JSON-lines output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ResultEvent {
    pub template_id: String,
    #[serde(default)]
    pub template_path: String,
    #[serde(default)]
    pub info: BTreeMap<String, MetaValue>,
    #[serde(default)]
    pub matcher_name: String,
    #[serde(default)]
    pub extractor_name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub host: String,
    #[serde(rename = "matched-at", alias = "matched", default)]
    pub matched: String,
    #[serde(default)]
    pub extracted_results: Vec<String>,
    #[serde(default)]
    pub request: String,
    #[serde(default)]
    pub response: String,
    #[serde(rename = "meta", alias = "metadata", default)]
    pub metadata: BTreeMap<String, MetaValue>,
    #[serde(default)]
    pub ip: String,
    pub timestamp: DateTime<FixedOffset>,
    #[serde(default)]
    pub curl_command: String,
}

/// Loosely typed metadata value. Rendered to text through `Display`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<MetaValue>),
    Map(BTreeMap<String, MetaValue>),
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Null => Ok(()),
            MetaValue::Bool(flag) => write!(f, "{flag}"),
            MetaValue::Integer(number) => write!(f, "{number}"),
            MetaValue::Float(number) => write!(f, "{number}"),
            MetaValue::String(text) => f.write_str(text),
            MetaValue::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            MetaValue::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(value: String) -> Self {
        MetaValue::String(value)
    }
}

impl From<bool> for MetaValue {
    fn from(value: bool) -> Self {
        MetaValue::Bool(value)
    }
}

impl From<i64> for MetaValue {
    fn from(value: i64) -> Self {
        MetaValue::Integer(value)
    }
}

impl From<f64> for MetaValue {
    fn from(value: f64) -> Self {
        MetaValue::Float(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{MetaValue, ResultEvent};
    use std::collections::BTreeMap;

    #[test]
    fn scalar_values_render_as_text() {
        assert_eq!(MetaValue::from("plain").to_string(), "plain");
        assert_eq!(MetaValue::from(443_i64).to_string(), "443");
        assert_eq!(MetaValue::from(0.5_f64).to_string(), "0.5");
        assert_eq!(MetaValue::from(2.0_f64).to_string(), "2");
        assert_eq!(MetaValue::from(true).to_string(), "true");
        assert_eq!(MetaValue::Null.to_string(), "");
    }

    #[test]
    fn nested_values_render_recursively() {
        let list = MetaValue::List(vec!["cve".into(), 7_i64.into()]);
        assert_eq!(list.to_string(), "[cve, 7]");

        let mut entries = BTreeMap::new();
        entries.insert("cvss".to_string(), MetaValue::Float(9.8));
        entries.insert("id".to_string(), MetaValue::from("CVE-2021-44228"));
        assert_eq!(
            MetaValue::Map(entries).to_string(),
            "{cvss: 9.8, id: CVE-2021-44228}"
        );
    }

    #[test]
    fn parses_scanner_json_line() {
        let line = r#"{
            "template-id": "git-config",
            "info": {"name": "Git Config Disclosure", "severity": "medium", "tags": ["git", "exposure"]},
            "matcher-name": "body",
            "type": "http",
            "host": "https://example.com",
            "matched-at": "https://example.com/.git/config",
            "extracted-results": ["repositoryformatversion"],
            "meta": {"port": 443, "tls": true, "ratio": 0.25, "note": null},
            "timestamp": "2021-06-01T10:15:30.5+02:00"
        }"#;

        let event: ResultEvent = serde_json::from_str(line).expect("event should parse");
        assert_eq!(event.template_id, "git-config");
        assert_eq!(event.kind, "http");
        assert_eq!(event.matched, "https://example.com/.git/config");
        assert_eq!(event.extractor_name, "");
        assert!(event.request.is_empty());
        assert_eq!(
            event.info.get("tags"),
            Some(&MetaValue::List(vec!["git".into(), "exposure".into()]))
        );
        assert_eq!(event.metadata.get("port"), Some(&MetaValue::Integer(443)));
        assert_eq!(event.metadata.get("tls"), Some(&MetaValue::Bool(true)));
        assert_eq!(event.metadata.get("ratio"), Some(&MetaValue::Float(0.25)));
        assert_eq!(event.metadata.get("note"), Some(&MetaValue::Null));
    }

    #[test]
    fn accepts_legacy_field_names() {
        let line = r#"{
            "template-id": "t",
            "type": "dns",
            "host": "example.com",
            "matched": "example.com",
            "metadata": {"k": "v"},
            "timestamp": "2021-06-01T10:15:30Z"
        }"#;

        let event: ResultEvent = serde_json::from_str(line).expect("event should parse");
        assert_eq!(event.matched, "example.com");
        assert_eq!(event.metadata.get("k"), Some(&MetaValue::from("v")));
    }
}

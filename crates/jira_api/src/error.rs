//! Error model used by Jira client operations.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, JiraError>;

/// Failures surfaced by the Jira client. Nothing is retried; every variant
/// propagates straight to the caller.
#[derive(Debug, Error)]
pub enum JiraError {
    #[error("could not initialize jira client: {0}")]
    ClientInit(String),
    /// The create-issue call was rejected or never reached the tracker. The
    /// raw response body is kept next to the cause for diagnosis.
    #[error("{} => {}", .cause, .body.as_deref().unwrap_or_default())]
    IssueCreate {
        status: Option<StatusCode>,
        cause: String,
        body: Option<String>,
        messages: Vec<String>,
    },
    #[error("{} => {}", .cause, .body.as_deref().unwrap_or_default())]
    Request {
        status: Option<StatusCode>,
        cause: String,
        body: Option<String>,
    },
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl JiraError {
    /// Builds an issue-creation error from a non-success response.
    pub fn rejected(status: StatusCode, body: String) -> Self {
        let messages = extract_error_messages(&body);
        JiraError::IssueCreate {
            status: Some(status),
            cause: format!("request failed with status {status}"),
            body: non_empty(body),
            messages,
        }
    }

    /// Builds an issue-creation error from a transport failure.
    pub fn transport(err: reqwest::Error) -> Self {
        JiraError::IssueCreate {
            status: err.status(),
            cause: err.to_string(),
            body: None,
            messages: Vec::new(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            JiraError::IssueCreate { status, .. } | JiraError::Request { status, .. } => *status,
            _ => None,
        }
    }

    /// Raw response body, when the tracker sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            JiraError::IssueCreate { body, .. } | JiraError::Request { body, .. } => {
                body.as_deref()
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for JiraError {
    fn from(err: reqwest::Error) -> Self {
        JiraError::Request {
            status: err.status(),
            cause: err.to_string(),
            body: None,
        }
    }
}

impl From<serde_json::Error> for JiraError {
    fn from(err: serde_json::Error) -> Self {
        JiraError::Serialization(err.to_string())
    }
}

/// Error payload Jira returns on rejected requests.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorCollection {
    #[serde(default)]
    error_messages: Vec<String>,
    #[serde(default)]
    errors: std::collections::BTreeMap<String, String>,
}

fn extract_error_messages(body: &str) -> Vec<String> {
    let Ok(collection) = serde_json::from_str::<ErrorCollection>(body) else {
        return Vec::new();
    };
    collection
        .error_messages
        .into_iter()
        .chain(
            collection
                .errors
                .into_iter()
                .map(|(field, message)| format!("{field}: {message}")),
        )
        .collect()
}

fn non_empty(body: String) -> Option<String> {
    if body.trim().is_empty() {
        None
    } else {
        Some(body)
    }
}

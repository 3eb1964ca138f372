//! Typed Jira client crate that files scanner findings as issues.

pub mod client;
pub mod config;
pub mod creator;
pub mod description;
pub mod error;
pub mod format;
pub mod models;

pub use client::JiraClient;
pub use config::JiraConfig;
pub use creator::IssueCreator;
pub use description::{format_description, format_timestamp};
pub use error::{JiraError, Result};
pub use format::{matched_template, summary};
pub use models::{
    AccountRef, CreatedIssue, IssueCreateRequest, IssueFields, MetaValue, NamedRef, ProjectRef,
    ResultEvent, UserProfile,
};

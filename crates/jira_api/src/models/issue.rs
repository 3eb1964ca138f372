use serde::{Deserialize, Serialize};

/// Body of `POST /rest/api/{version}/issue`.
#[derive(Debug, Clone, Serialize)]
pub struct IssueCreateRequest {
    pub fields: IssueFields,
}

#[derive(Debug, Clone, Serialize)]
pub struct IssueFields {
    pub assignee: AccountRef,
    pub reporter: AccountRef,
    pub issuetype: NamedRef,
    pub project: ProjectRef,
    pub summary: String,
    /// Jira wiki markup.
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRef {
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NamedRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectRef {
    pub key: String,
}

/// Success payload of the create call. Only used for logging.
#[derive(Debug, Deserialize, Clone)]
pub struct CreatedIssue {
    pub id: String,
    pub key: String,
    #[serde(rename = "self", default)]
    pub self_url: Option<String>,
}

//! Files one Jira issue per scanner finding.

use tracing::{info, info_span, Instrument};

use crate::client::JiraClient;
use crate::config::JiraConfig;
use crate::description::format_description;
use crate::error::Result;
use crate::format::summary;
use crate::models::{AccountRef, IssueCreateRequest, IssueFields, NamedRef, ProjectRef, ResultEvent};

/// Turns result events into Jira issues.
///
/// Every call to [`IssueCreator::create_issue`] files a new ticket: there is
/// no deduplication, caching or retry, so calling it twice with the same
/// event creates two issues.
#[derive(Clone, Debug)]
pub struct IssueCreator {
    client: JiraClient,
}

impl IssueCreator {
    /// Builds the basic-auth client. No request is sent.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::ClientInit`](crate::JiraError::ClientInit) when
    /// the server URL is malformed or the transport cannot be built.
    pub fn new(config: JiraConfig) -> Result<Self> {
        let client = JiraClient::new(config)?;
        Ok(Self { client })
    }

    pub fn config(&self) -> &JiraConfig {
        self.client.config()
    }

    pub fn client(&self) -> &JiraClient {
        &self.client
    }

    /// Maps an event onto the create-issue payload.
    pub fn build_issue(&self, event: &ResultEvent) -> IssueCreateRequest {
        let config = self.client.config();
        IssueCreateRequest {
            fields: IssueFields {
                assignee: AccountRef {
                    account_id: config.account_id.clone(),
                },
                reporter: AccountRef {
                    account_id: config.account_id.clone(),
                },
                issuetype: NamedRef {
                    name: config.issue_type.clone(),
                },
                project: ProjectRef {
                    key: config.project_key.clone(),
                },
                summary: summary(event),
                description: format_description(event),
            },
        }
    }

    /// Creates the issue for `event`.
    ///
    /// # Errors
    ///
    /// Returns [`JiraError::IssueCreate`](crate::JiraError::IssueCreate)
    /// carrying the transport or API error together with the raw response
    /// body.
    pub async fn create_issue(&self, event: &ResultEvent) -> Result<()> {
        let span = info_span!(
            "create_issue",
            template = %event.template_id,
            host = %event.host
        );

        async {
            let payload = self.build_issue(event);
            let created = self.client.create_issue(&payload).await?;
            match created {
                Some(issue) => info!(key = %issue.key, "jira issue created"),
                None => info!("jira issue created"),
            }
            Ok(())
        }
        .instrument(span)
        .await
    }
}

use std::fmt;
use std::time::Duration;

pub const DEFAULT_API_VERSION: &str = "2";
pub const DEFAULT_USER_AGENT: &str = "jira-reporter";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection and destination settings for a Jira instance. Immutable once
/// handed to a client.
#[derive(Clone)]
pub struct JiraConfig {
    pub server_url: String,
    pub account_id: String,
    pub email: String,
    pub token: String,
    pub project_key: String,
    pub issue_type: String,
    pub api_version: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
}

impl JiraConfig {
    pub fn new(
        server_url: impl Into<String>,
        email: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into(),
            account_id: String::new(),
            email: email.into(),
            token: token.into(),
            project_key: String::new(),
            issue_type: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = account_id.into();
        self
    }

    pub fn with_project_key(mut self, project_key: impl Into<String>) -> Self {
        self.project_key = project_key.into();
        self
    }

    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    pub fn with_user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn with_timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn with_connect_timeout(mut self, duration: Duration) -> Self {
        self.connect_timeout = duration;
        self
    }

    pub fn api_root(&self) -> String {
        format!(
            "{}/rest/api/{}/",
            self.server_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("server_url", &self.server_url)
            .field("account_id", &self.account_id)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("project_key", &self.project_key)
            .field("issue_type", &self.issue_type)
            .field("api_version", &self.api_version)
            .field("user_agent", &self.user_agent)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

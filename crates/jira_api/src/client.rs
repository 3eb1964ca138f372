use crate::config::JiraConfig;
use crate::error::{JiraError, Result};
use crate::models::{CreatedIssue, IssueCreateRequest, UserProfile};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Url};
use tracing::{debug, warn};

/// Authenticated Jira REST client. Cheap to clone; clones share one
/// connection pool and can be used from concurrent tasks.
#[derive(Clone, Debug)]
pub struct JiraClient {
    http: HttpClient,
    config: JiraConfig,
}

impl JiraClient {
    pub fn new(config: JiraConfig) -> Result<Self> {
        validate_server_url(&config.server_url)?;
        let http = build_http_client(&config)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    /// Files a new issue. The created issue payload is parsed when present
    /// but a 2xx status alone counts as success.
    pub async fn create_issue(&self, payload: &IssueCreateRequest) -> Result<Option<CreatedIssue>> {
        debug!(project = %payload.fields.project.key, "creating jira issue");
        let response = self
            .request(Method::POST, "issue")
            .json(payload)
            .send()
            .await
            .map_err(JiraError::transport)?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            warn!(%status, "jira rejected issue creation");
            return Err(JiraError::rejected(status, body));
        }
        Ok(serde_json::from_str::<CreatedIssue>(&body).ok())
    }

    pub async fn get_myself(&self) -> Result<UserProfile> {
        let response = self.request(Method::GET, "myself").send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            return Err(JiraError::Request {
                status: Some(status),
                cause: format!("request failed with status {status}"),
                body: Some(body).filter(|text| !text.trim().is_empty()),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.url_for(path))
            .basic_auth(&self.config.email, Some(&self.config.token))
    }

    fn url_for(&self, path: &str) -> String {
        let mut base = self.config.api_root();
        base.push_str(path.trim_start_matches('/'));
        base
    }
}

fn validate_server_url(server_url: &str) -> Result<()> {
    let url = Url::parse(server_url.trim())
        .map_err(|err| JiraError::ClientInit(format!("invalid server url {server_url:?}: {err}")))?;
    match url.scheme() {
        "http" | "https" if url.has_host() => Ok(()),
        _ => Err(JiraError::ClientInit(format!(
            "server url {server_url:?} must be an absolute http(s) url"
        ))),
    }
}

fn build_http_client(config: &JiraConfig) -> Result<HttpClient> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(USER_AGENT, header_value(&config.user_agent)?);

    let mut builder = HttpClient::builder()
        .default_headers(headers)
        .connect_timeout(config.connect_timeout);
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    builder
        .build()
        .map_err(|err| JiraError::ClientInit(err.to_string()))
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|err| JiraError::ClientInit(err.to_string()))
}

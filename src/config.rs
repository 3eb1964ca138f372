//! Reporter configuration model and file-backed manager.

use jira_api::JiraConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default issue type filed for findings.
fn default_issue_type() -> String {
    "Bug".to_string()
}

/// Represents the reporter configuration persisted on disk: Jira location, credentials and the destination project.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub url: String,
    pub account_id: String,
    pub email: String,
    #[serde(default)]
    pub token: String,
    pub project_name: String,
    #[serde(default = "default_issue_type")]
    pub issue_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Checks that every required setting is present.
    pub fn validate(&self) -> Result<(), String> {
        let required = [
            ("url", &self.url),
            ("account-id", &self.account_id),
            ("email", &self.email),
            ("token", &self.token),
            ("project-name", &self.project_name),
            ("issue-type", &self.issue_type),
        ];
        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("Missing required settings: {}", missing.join(", ")))
        }
    }

    /// Converts the settings into the client configuration.
    pub fn to_jira_config(&self) -> JiraConfig {
        let config = JiraConfig::new(self.url.trim(), self.email.trim(), self.token.trim())
            .with_account_id(self.account_id.trim())
            .with_project_key(self.project_name.trim())
            .with_issue_type(self.issue_type.trim());
        match self.timeout_secs {
            Some(secs) => config.with_timeout(Duration::from_secs(secs)),
            None => config,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("url", &self.url)
            .field("account_id", &self.account_id)
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("project_name", &self.project_name)
            .field("issue_type", &self.issue_type)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Manages loading and saving of reporter configuration to a JSON file.
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Creates a manager bound to the platform-specific config path.
    pub fn new() -> Result<Self, String> {
        let dirs = directories::ProjectDirs::from("ru", "sovego", "jira-reporter")
            .ok_or_else(|| "Could not determine config directory".to_string())?;
        let path = dirs.config_dir().join("config.json");
        Ok(Self { path })
    }

    /// Creates a manager bound to an explicit config file.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads config from disk, applying a token override when one is given.
    pub fn load(&self, token_override: Option<&str>) -> Result<Config, String> {
        let content = fs::read_to_string(&self.path).map_err(|err| {
            format!("Failed to read config {}: {err}", self.path.display())
        })?;
        let mut config: Config = serde_json::from_str(&content).map_err(|err| {
            format!("Failed to parse config {}: {err}", self.path.display())
        })?;
        if let Some(token) = token_override.filter(|token| !token.trim().is_empty()) {
            config.token = token.to_string();
        }
        config.validate()?;
        Ok(config)
    }

    /// Persists config to disk, creating parent directories when needed.
    pub fn save(&self, config: &Config) -> Result<(), std::io::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Config, ConfigManager};
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    fn unique_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        env::temp_dir().join(format!("jira-reporter-tests-{name}-{nanos}/config.json"))
    }

    fn sample() -> Config {
        Config {
            url: "https://acme.atlassian.net".to_string(),
            account_id: "5b10ac8d82e05b22cc7d4ef5".to_string(),
            email: "bot@acme.io".to_string(),
            token: "secret".to_string(),
            project_name: "SEC".to_string(),
            issue_type: "Task".to_string(),
            timeout_secs: None,
        }
    }

    #[test]
    fn parses_kebab_case_keys_and_defaults_issue_type() {
        let config: Config = serde_json::from_str(
            r#"{"url":"https://acme.atlassian.net","account-id":"abc","email":"bot@acme.io","token":"t","project-name":"SEC"}"#,
        )
        .expect("config should parse");
        assert_eq!(config.account_id, "abc");
        assert_eq!(config.project_name, "SEC");
        assert_eq!(config.issue_type, "Bug");
        assert!(config.timeout_secs.is_none());
    }

    #[test]
    fn save_and_load_round_trip() {
        let path = unique_path("roundtrip");
        let parent = path.parent().map(ToOwned::to_owned);

        let manager = ConfigManager::from_path(path.clone());
        manager.save(&sample()).expect("save should succeed");
        let loaded = manager.load(None).expect("load should succeed");
        assert_eq!(loaded, sample());

        if let Some(parent) = parent {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn token_override_replaces_file_token() {
        let path = unique_path("override");
        let parent = path.parent().map(ToOwned::to_owned);

        let mut config = sample();
        config.token = String::new();
        let manager = ConfigManager::from_path(path.clone());
        manager.save(&config).expect("save should succeed");

        assert!(manager.load(None).unwrap_err().contains("token"));
        let loaded = manager.load(Some("from-env")).expect("load should succeed");
        assert_eq!(loaded.token, "from-env");

        if let Some(parent) = parent {
            let _ = fs::remove_dir_all(parent);
        }
    }

    #[test]
    fn load_missing_file_is_an_error() {
        let manager = ConfigManager::from_path(unique_path("missing"));
        let err = manager.load(None).unwrap_err();
        assert!(err.starts_with("Failed to read config"));
    }

    #[test]
    fn load_invalid_json_is_an_error() {
        let path = unique_path("invalid");
        let parent = path.parent().expect("parent must exist");
        fs::create_dir_all(parent).expect("create temp directory");
        fs::write(&path, "not-valid-json").expect("write invalid config");

        let err = ConfigManager::from_path(path.clone()).load(None).unwrap_err();
        assert!(err.starts_with("Failed to parse config"));

        let _ = fs::remove_dir_all(parent);
    }

    #[test]
    fn validate_lists_every_missing_setting() {
        let mut config = sample();
        config.email = " ".to_string();
        config.project_name.clear();
        assert_eq!(
            config.validate().unwrap_err(),
            "Missing required settings: email, project-name"
        );
    }

    #[test]
    fn debug_output_hides_token() {
        let rendered = format!("{:?}", sample());
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("bot@acme.io"));
    }

    #[test]
    fn converts_to_client_config() {
        let mut config = sample();
        config.timeout_secs = Some(20);
        let jira = config.to_jira_config();
        assert_eq!(jira.server_url, "https://acme.atlassian.net");
        assert_eq!(jira.project_key, "SEC");
        assert_eq!(jira.issue_type, "Task");
        assert_eq!(jira.account_id, "5b10ac8d82e05b22cc7d4ef5");
        assert_eq!(jira.timeout, Some(Duration::from_secs(20)));
    }
}

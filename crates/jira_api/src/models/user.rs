//! User profile returned by `/myself`.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
/// Represents the authenticated Jira account, including account id, display name and email.
pub struct UserProfile {
    pub account_id: Option<String>,
    pub display_name: Option<String>,
    pub email_address: Option<String>,
    #[serde(default)]
    pub active: bool,
}

impl UserProfile {
    /// Returns the best available human-readable label for the account.
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.email_address.clone())
            .or_else(|| self.account_id.clone())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

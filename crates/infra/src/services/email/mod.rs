use serde::Serialize;
use tracing::{error, warn};
use url::Url;

/// Payload of a deadline reminder email as handed to the mail relay.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineReminderEmail {
    pub to_email: String,
    pub user_name: String,
    pub task_name: String,
    pub task_desc: String,
    pub project_name: Option<String>,
    pub hours_until_due: f64,
    pub due_date_display: String,
    /// Display category: High / Medium / Low
    pub priority_level: String,
}

#[async_trait::async_trait]
pub trait IEmailService: Send + Sync {
    /// Returns true when the reminder was handed off successfully. A failed
    /// send is reported but must never abort the caller's batch.
    async fn send_deadline_reminder(&self, reminder: &DeadlineReminderEmail) -> bool;
}

/// Delivers reminder emails by posting them to a configured mail relay
/// endpoint.
pub struct RelayEmailService {
    client: reqwest::Client,
    relay_url: Option<Url>,
    relay_key: Option<String>,
}

impl RelayEmailService {
    pub fn new(relay_url: Option<Url>, relay_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            relay_url,
            relay_key,
        }
    }
}

#[async_trait::async_trait]
impl IEmailService for RelayEmailService {
    async fn send_deadline_reminder(&self, reminder: &DeadlineReminderEmail) -> bool {
        let url = match &self.relay_url {
            Some(url) => url.clone(),
            None => {
                warn!(
                    "No email relay configured, skipping deadline reminder to {}",
                    reminder.to_email
                );
                return false;
            }
        };

        let mut request = self.client.post(url.as_str()).json(reminder);
        if let Some(key) = &self.relay_key {
            request = request.header("x-taskwarden-relay-key", key.as_str());
        }

        match request.send().await {
            Ok(res) if res.status().is_success() => true,
            Ok(res) => {
                error!(
                    "Email relay rejected deadline reminder for {}: {}",
                    reminder.to_email,
                    res.status()
                );
                false
            }
            Err(e) => {
                error!(
                    "Error delivering deadline reminder to {}: {:?}",
                    reminder.to_email, e
                );
                false
            }
        }
    }
}

/// Email service that accepts and drops every reminder, used when testing
pub struct NoopEmailService;

#[async_trait::async_trait]
impl IEmailService for NoopEmailService {
    async fn send_deadline_reminder(&self, _reminder: &DeadlineReminderEmail) -> bool {
        true
    }
}

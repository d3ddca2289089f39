use chrono_tz::Tz;
use taskwarden_utils::create_random_secret;
use tracing::{info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct Config {
    /// Secret key that the manual deadline-check trigger endpoint requires
    /// in the `taskwarden-admin-api-key` header
    pub api_key: String,
    /// Port for the application to run on
    pub port: usize,
    /// Timezone used to derive calendar dates from millisecond timestamps
    /// when resolving recurring due dates
    pub timezone: Tz,
    /// How many hours ahead of now a due date qualifies for a reminder.
    /// Tasks that are already overdue never qualify.
    pub deadline_lookahead_hours: i64,
    /// How long a `(task, user)` pair stays muted after a reminder was
    /// dispatched for it
    pub dedupe_window_hours: i64,
    /// Upper bound on the number of occurrence steps taken while resolving
    /// a recurring due date. Guards against pathological recurrence
    /// configurations.
    pub max_recurrence_iterations: usize,
    /// Seconds between automatic deadline scans
    pub deadline_check_interval_secs: u64,
    /// Endpoint of the mail relay that deadline reminder emails are posted
    /// to. When unset, email delivery is skipped.
    pub email_relay_url: Option<Url>,
    pub email_relay_key: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let api_key = match std::env::var("TASKWARDEN_API_KEY") {
            Ok(key) => key,
            Err(_) => {
                info!("Did not find TASKWARDEN_API_KEY environment variable. Going to create one.");
                let key = create_random_secret(16);
                info!(
                    "Secret api key for the deadline-check trigger was generated and set to: {}",
                    key
                );
                key
            }
        };

        let default_port = "5000";
        let port = std::env::var("PORT").unwrap_or_else(|_| default_port.into());
        let port = match port.parse::<usize>() {
            Ok(port) => port,
            Err(_) => {
                warn!(
                    "The given PORT: {} is not valid, falling back to the default port: {}.",
                    port, default_port
                );
                default_port.parse::<usize>().unwrap()
            }
        };

        let timezone = match std::env::var("TIMEZONE") {
            Ok(tz) => match tz.parse::<Tz>() {
                Ok(tz) => tz,
                Err(_) => {
                    warn!("The given TIMEZONE: {} is not valid, falling back to UTC.", tz);
                    Tz::UTC
                }
            },
            Err(_) => Tz::UTC,
        };

        let email_relay_url = match std::env::var("EMAIL_RELAY_URL") {
            Ok(url) => match Url::parse(&url) {
                Ok(url) => Some(url),
                Err(_) => {
                    warn!(
                        "The given EMAIL_RELAY_URL: {} is not a valid url, email delivery is disabled.",
                        url
                    );
                    None
                }
            },
            Err(_) => None,
        };
        let email_relay_key = std::env::var("EMAIL_RELAY_KEY").ok();

        Self {
            api_key,
            port,
            timezone,
            email_relay_url,
            email_relay_key,
            deadline_lookahead_hours: 24,
            dedupe_window_hours: 23,
            max_recurrence_iterations: 500,
            deadline_check_interval_secs: 60 * 5, // 5 minutes
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

mod email;

pub use email::{DeadlineReminderEmail, IEmailService, NoopEmailService, RelayEmailService};

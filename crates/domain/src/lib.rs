mod date;
mod notification;
mod project;
mod reminder;
mod shared;
mod task;
mod user;

pub use date::{add_months, format_date, get_month_length, is_leap_year};
pub use notification::{Notification, NotificationType};
pub use project::Project;
pub use reminder::ReminderReceipt;
pub use shared::entity::{Entity, InvalidIDError, ID};
pub use shared::recurrence::{CustomUnit, RecurrenceEnd, RecurrenceFrequency, RecurrenceOptions};
pub use task::{Task, TaskStatus};
pub use user::{User, UserRole};

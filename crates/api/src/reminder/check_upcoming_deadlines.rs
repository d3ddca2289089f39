use crate::error::TaskwardenError;
use crate::shared::auth::protect_admin_route;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::{LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::Tz;
use taskwarden_api_structs::run_deadline_check::*;
use taskwarden_domain::{format_date, Notification, NotificationType, ReminderReceipt, Task, User};
use taskwarden_infra::{Config, DeadlineReminderEmail, TaskwardenContext};
use tracing::{error, warn};

pub async fn run_deadline_check_controller(
    http_req: HttpRequest,
    ctx: web::Data<TaskwardenContext>,
) -> Result<HttpResponse, TaskwardenError> {
    protect_admin_route(&http_req, &ctx)?;

    let usecase = CheckUpcomingDeadlinesUseCase::from_config(&ctx.config);

    execute(usecase, &ctx)
        .await
        .map(|count| HttpResponse::Ok().json(APIResponse::new(count)))
        .map_err(TaskwardenError::from)
}

/// Scans all active tasks, resolves each task's effective due date and
/// notifies assigned staff members about deadlines inside the lookahead
/// window. Each created notification is also handed to the email gateway.
///
/// A `(task, user)` pair that was notified within the dedupe window is
/// skipped, which makes repeated scans idempotent in between deadlines.
#[derive(Debug)]
pub struct CheckUpcomingDeadlinesUseCase {
    /// Only tasks due within this many hours from now qualify
    pub lookahead_hours: i64,
    /// Hours a `(task, user)` pair stays muted after a dispatched reminder
    pub dedupe_window_hours: i64,
    /// Cap on occurrence steps when resolving recurring due dates
    pub max_iterations: usize,
}

impl CheckUpcomingDeadlinesUseCase {
    pub fn from_config(config: &Config) -> Self {
        Self {
            lookahead_hours: config.deadline_lookahead_hours,
            dedupe_window_hours: config.dedupe_window_hours,
            max_iterations: config.max_recurrence_iterations,
        }
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for TaskwardenError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

fn local_timestamp(tz: &Tz, datetime: NaiveDateTime) -> Option<i64> {
    match tz.from_local_datetime(&datetime) {
        LocalResult::Single(dt) => Some(dt.timestamp_millis()),
        // During a DST fold, prefer the earlier instant
        LocalResult::Ambiguous(dt, _) => Some(dt.timestamp_millis()),
        LocalResult::None => None,
    }
}

/// The instant a task is due, given its resolved due date.
///
/// Non-recurring tasks are due at their stored timestamp. Recurring
/// occurrences inherit the wall-clock time of the task's base due
/// timestamp; without one they are due at midnight. Returns `None` when the
/// local datetime does not exist in the scan timezone (DST gap).
fn due_timestamp(task: &Task, due_date: NaiveDate, is_recurring: bool, tz: &Tz) -> Option<i64> {
    if !is_recurring {
        return task.end_ts.or(task.start_ts);
    }
    let due_time = task
        .end_ts
        .and_then(|ts| tz.timestamp_millis_opt(ts).single())
        .map(|dt| dt.time())
        .unwrap_or(NaiveTime::MIN);
    local_timestamp(tz, due_date.and_time(due_time))
}

fn hours_between(from_ts: i64, to_ts: i64) -> f64 {
    (to_ts - from_ts) as f64 / (1000.0 * 60.0 * 60.0)
}

fn deadline_notification(task: &Task, user: &User, hours_until_due: f64, now_ts: i64) -> Notification {
    Notification {
        id: Default::default(),
        user_id: user.id.clone(),
        notification_type: NotificationType::Deadline,
        title: "Deadline approaching!".into(),
        message: format!("{} is due in {} hours", task.name, hours_until_due as i64),
        task_id: Some(task.id.clone()),
        project_id: task.project_id.clone(),
        timestamp: now_ts,
        read: false,
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CheckUpcomingDeadlinesUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "CheckUpcomingDeadlines";

    async fn execute(&mut self, ctx: &TaskwardenContext) -> Result<Self::Response, Self::Error> {
        let now_ts = ctx.sys.get_timestamp_millis();
        let tz = ctx.config.timezone;
        let now_date = tz
            .timestamp_millis_opt(now_ts)
            .single()
            .expect("Instant to timezone conversion is unambiguous")
            .date_naive();

        let tasks = ctx
            .repos
            .tasks
            .find_active()
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let mut notifications_created = 0;

        for task in tasks {
            if !task.is_active() {
                continue;
            }

            let (due_date, is_recurring) =
                task.effective_due_date(now_date, &tz, self.max_iterations);
            let due_date = match due_date {
                Some(due_date) => due_date,
                None => continue,
            };
            let due_ts = match due_timestamp(&task, due_date, is_recurring, &tz) {
                Some(due_ts) => due_ts,
                None => continue,
            };

            let hours_until_due = hours_between(now_ts, due_ts);
            // Strict window: upcoming deadlines only, never overdue ones
            if hours_until_due < 0.0 || hours_until_due > self.lookahead_hours as f64 {
                continue;
            }

            let project_name = match &task.project_id {
                Some(project_id) => ctx.repos.projects.find(project_id).await.map(|p| p.name),
                None => None,
            };

            for user_id in &task.assigned_to {
                let user = match ctx.repos.users.find(user_id).await {
                    Some(user) => user,
                    None => {
                        warn!("Skipping deadline reminder for unknown user: {}", user_id);
                        continue;
                    }
                };
                if !user.role.receives_deadline_reminders() {
                    continue;
                }

                if let Some(receipt) = ctx.repos.reminder_receipts.find(&task.id, &user.id).await {
                    if receipt.suppresses(now_ts, self.dedupe_window_hours) {
                        continue;
                    }
                }

                let notification = deadline_notification(&task, &user, hours_until_due, now_ts);
                if let Err(e) = ctx.repos.notifications.insert(&notification).await {
                    error!(
                        "Error creating deadline notification for user: {}: {:?}",
                        user.id, e
                    );
                    continue;
                }
                notifications_created += 1;

                let receipt = ReminderReceipt {
                    task_id: task.id.clone(),
                    user_id: user.id.clone(),
                    last_notified_at: now_ts,
                };
                if let Err(e) = ctx.repos.reminder_receipts.upsert(&receipt).await {
                    error!(
                        "Error recording reminder receipt for user: {}: {:?}",
                        user.id, e
                    );
                }

                let email = DeadlineReminderEmail {
                    to_email: user.email.clone(),
                    user_name: user.name.clone(),
                    task_name: task.name.clone(),
                    task_desc: task.description.clone(),
                    project_name: project_name.clone(),
                    hours_until_due,
                    due_date_display: format_date(&due_date),
                    priority_level: task.priority_category().into(),
                };
                // The notification exists either way; a failed email only
                // loses the out-of-app copy
                if !ctx.email.send_deadline_reminder(&email).await {
                    error!("Failed to deliver deadline reminder email to {}", user.email);
                }
            }
        }

        Ok(notifications_created)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};
    use taskwarden_domain::{
        RecurrenceFrequency, RecurrenceOptions, TaskStatus, UserRole, ID,
    };
    use taskwarden_infra::{setup_context_inmemory, IEmailService, ISys, ITaskRepo};

    struct StaticTimeSys(i64);
    impl ISys for StaticTimeSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    struct RecordingEmailService {
        sent: Mutex<Vec<DeadlineReminderEmail>>,
        succeed: bool,
    }

    impl RecordingEmailService {
        fn new(succeed: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                succeed,
            }
        }

        fn sent(&self) -> Vec<DeadlineReminderEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl IEmailService for RecordingEmailService {
        async fn send_deadline_reminder(&self, reminder: &DeadlineReminderEmail) -> bool {
            self.sent.lock().unwrap().push(reminder.clone());
            self.succeed
        }
    }

    struct FailingTaskRepo;

    #[async_trait::async_trait]
    impl ITaskRepo for FailingTaskRepo {
        async fn insert(&self, _task: &Task) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("database unavailable"))
        }
        async fn save(&self, _task: &Task) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("database unavailable"))
        }
        async fn find(&self, _task_id: &ID) -> Option<Task> {
            None
        }
        async fn find_active(&self) -> anyhow::Result<Vec<Task>> {
            Err(anyhow::anyhow!("database unavailable"))
        }
        async fn delete(&self, _task_id: &ID) -> Option<Task> {
            None
        }
    }

    const HOUR: i64 = 60 * 60 * 1000;

    fn ts(year: i32, month: u32, day: u32, hour: u32, min: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, hour, min, 0)
            .unwrap()
            .timestamp_millis()
    }

    // Monday at noon
    fn now_ts() -> i64 {
        ts(2024, 1, 15, 12, 0)
    }

    fn usecase() -> CheckUpcomingDeadlinesUseCase {
        CheckUpcomingDeadlinesUseCase {
            lookahead_hours: 24,
            dedupe_window_hours: 23,
            max_iterations: 500,
        }
    }

    fn task_factory(end_ts: Option<i64>, assigned_to: Vec<ID>) -> Task {
        Task {
            id: Default::default(),
            name: "Prepare audit".into(),
            description: "Collect all reports".into(),
            project_id: None,
            status: TaskStatus::Ongoing,
            priority: 9,
            start_ts: Some(ts(2024, 1, 1, 9, 0)),
            end_ts,
            assigned_to,
            deleted: false,
            recurrence: None,
            created: 0,
            updated: 0,
        }
    }

    struct TestContext {
        ctx: TaskwardenContext,
        email: Arc<RecordingEmailService>,
    }

    fn setup(now_ts: i64, email_succeeds: bool) -> TestContext {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(now_ts));
        let email = Arc::new(RecordingEmailService::new(email_succeeds));
        ctx.email = email.clone();
        TestContext { ctx, email }
    }

    async fn insert_user(ctx: &TaskwardenContext, role: UserRole) -> User {
        let user = User::new("Jamie", "jamie@example.com", role);
        ctx.repos.users.insert(&user).await.unwrap();
        user
    }

    #[actix_web::test]
    async fn notifies_staff_assignee_for_task_due_within_window() {
        let TestContext { ctx, email } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        let task = task_factory(Some(now_ts() + 12 * HOUR), vec![staff.id.clone()]);
        ctx.repos.tasks.insert(&task).await.unwrap();

        let count = execute(usecase(), &ctx).await.unwrap();
        assert_eq!(count, 1);

        let notifications = ctx.repos.notifications.find_by_user(&staff.id, false, 50).await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].notification_type, NotificationType::Deadline);
        assert_eq!(notifications[0].task_id, Some(task.id.clone()));
        assert_eq!(
            notifications[0].message,
            "Prepare audit is due in 12 hours"
        );

        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to_email, "jamie@example.com");
        assert_eq!(sent[0].due_date_display, "2024-01-16");
        assert_eq!(sent[0].priority_level, "High");
        assert!((sent[0].hours_until_due - 12.0).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn managers_and_directors_are_not_notified() {
        let TestContext { ctx, email } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        let manager = insert_user(&ctx, UserRole::Manager).await;
        let director = insert_user(&ctx, UserRole::Director).await;
        let task = task_factory(
            Some(now_ts() + 12 * HOUR),
            vec![staff.id.clone(), manager.id.clone(), director.id.clone()],
        );
        ctx.repos.tasks.insert(&task).await.unwrap();

        let count = execute(usecase(), &ctx).await.unwrap();
        assert_eq!(count, 1);
        assert_eq!(email.sent().len(), 1);
        assert!(ctx
            .repos
            .notifications
            .find_by_user(&manager.id, false, 50)
            .await
            .is_empty());
    }

    #[actix_web::test]
    async fn window_boundaries_are_strict() {
        let TestContext { ctx, .. } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;

        // Exactly 24 hours away: included
        let task = task_factory(Some(now_ts() + 24 * HOUR), vec![staff.id.clone()]);
        ctx.repos.tasks.insert(&task).await.unwrap();
        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 1);
        ctx.repos.tasks.delete(&task.id).await.unwrap();

        // A fraction past 24 hours: excluded
        let task = task_factory(Some(now_ts() + 24 * HOUR + 360), vec![staff.id.clone()]);
        ctx.repos.tasks.insert(&task).await.unwrap();
        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 0);
        ctx.repos.tasks.delete(&task.id).await.unwrap();

        // A fraction overdue: excluded
        let task = task_factory(Some(now_ts() - 360), vec![staff.id.clone()]);
        ctx.repos.tasks.insert(&task).await.unwrap();
        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn repeated_scans_inside_dedupe_window_are_idempotent() {
        let TestContext { ctx, email } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        let task = task_factory(Some(now_ts() + 12 * HOUR), vec![staff.id.clone()]);
        ctx.repos.tasks.insert(&task).await.unwrap();

        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 1);
        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 0);
        assert_eq!(email.sent().len(), 1);
        assert_eq!(
            ctx.repos
                .notifications
                .find_by_user(&staff.id, false, 50)
                .await
                .len(),
            1
        );
    }

    #[actix_web::test]
    async fn recurring_task_is_notified_again_after_dedupe_window() {
        let TestContext { mut ctx, .. } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        // Daily recurring task due at 17:00 every day
        let mut task = task_factory(Some(ts(2024, 1, 1, 17, 0)), vec![staff.id.clone()]);
        task.recurrence = Some(Default::default());
        ctx.repos.tasks.insert(&task).await.unwrap();

        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 1);

        // One hour later the receipt still mutes the pair
        ctx.sys = Arc::new(StaticTimeSys(now_ts() + HOUR));
        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 0);

        // The next day's occurrence is due and the window has elapsed
        ctx.sys = Arc::new(StaticTimeSys(now_ts() + 24 * HOUR));
        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn weekly_recurring_task_is_due_on_matching_weekday() {
        // Wednesday 2024-01-10 at noon; Mon/Wed/Fri pattern from Monday
        // 2024-01-01 with a 17:00 base due time
        let scan_ts = ts(2024, 1, 10, 12, 0);
        let TestContext { ctx, email } = setup(scan_ts, true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        let mut task = task_factory(Some(ts(2024, 1, 1, 17, 0)), vec![staff.id.clone()]);
        task.recurrence = Some(RecurrenceOptions {
            freq: RecurrenceFrequency::Weekly {
                weekly_days: vec![0, 2, 4],
            },
            ..Default::default()
        });
        ctx.repos.tasks.insert(&task).await.unwrap();

        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 1);
        let sent = email.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].due_date_display, "2024-01-10");
        assert!((sent[0].hours_until_due - 5.0).abs() < 1e-9);
    }

    #[actix_web::test]
    async fn email_failures_do_not_abort_the_batch() {
        let TestContext { ctx, email } = setup(now_ts(), false);
        let staff1 = insert_user(&ctx, UserRole::Staff).await;
        let staff2 = insert_user(&ctx, UserRole::Staff).await;
        let task = task_factory(
            Some(now_ts() + 12 * HOUR),
            vec![staff1.id.clone(), staff2.id.clone()],
        );
        ctx.repos.tasks.insert(&task).await.unwrap();

        // Both notifications are created even though every email send fails
        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 2);
        assert_eq!(email.sent().len(), 2);
        assert_eq!(
            ctx.repos
                .notifications
                .find_by_user(&staff1.id, false, 50)
                .await
                .len(),
            1
        );
    }

    #[actix_web::test]
    async fn unknown_assignees_are_skipped() {
        let TestContext { ctx, .. } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        let task = task_factory(
            Some(now_ts() + 12 * HOUR),
            vec![ID::default(), staff.id.clone()],
        );
        ctx.repos.tasks.insert(&task).await.unwrap();

        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 1);
    }

    #[actix_web::test]
    async fn tasks_without_dates_are_excluded() {
        let TestContext { ctx, .. } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        let mut task = task_factory(None, vec![staff.id.clone()]);
        task.start_ts = None;
        task.recurrence = Some(Default::default());
        ctx.repos.tasks.insert(&task).await.unwrap();

        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 0);
    }

    #[actix_web::test]
    async fn reminder_email_carries_the_project_name() {
        let TestContext { ctx, email } = setup(now_ts(), true);
        let staff = insert_user(&ctx, UserRole::Staff).await;
        let project = taskwarden_domain::Project {
            id: Default::default(),
            name: "Year-end closing".into(),
        };
        ctx.repos.projects.insert(&project).await.unwrap();
        let mut task = task_factory(Some(now_ts() + 12 * HOUR), vec![staff.id.clone()]);
        task.project_id = Some(project.id.clone());
        ctx.repos.tasks.insert(&task).await.unwrap();

        assert_eq!(execute(usecase(), &ctx).await.unwrap(), 1);
        let sent = email.sent();
        assert_eq!(sent[0].project_name.as_deref(), Some("Year-end closing"));
    }

    #[actix_web::test]
    async fn store_failure_is_a_batch_level_error() {
        let TestContext { mut ctx, .. } = setup(now_ts(), true);
        ctx.repos.tasks = Arc::new(FailingTaskRepo);

        let res = execute(usecase(), &ctx).await;
        assert!(matches!(res, Err(UseCaseError::StorageError)));
    }
}

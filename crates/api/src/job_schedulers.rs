use crate::reminder::check_upcoming_deadlines::CheckUpcomingDeadlinesUseCase;
use crate::shared::usecase::execute;
use actix_web::rt::time::interval;
use std::time::Duration;
use taskwarden_infra::TaskwardenContext;
use tracing::{error, info};

/// Runs the deadline scan on a fixed interval for the lifetime of the
/// server. The manual trigger endpoint funnels through the same use case,
/// so both paths share the dedupe receipts.
pub fn start_deadline_check_job(ctx: TaskwardenContext) {
    actix_web::rt::spawn(async move {
        let mut check_interval =
            interval(Duration::from_secs(ctx.config.deadline_check_interval_secs));
        loop {
            check_interval.tick().await;

            let usecase = CheckUpcomingDeadlinesUseCase::from_config(&ctx.config);
            match execute(usecase, &ctx).await {
                Ok(count) if count > 0 => {
                    info!("Deadline check completed - {} notifications created", count)
                }
                Ok(_) => {}
                Err(e) => error!("Scheduled deadline check failed: {:?}", e),
            }
        }
    });
}

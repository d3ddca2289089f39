use crate::error::TaskwardenError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskwarden_api_structs::mark_all_notifications_read::*;
use taskwarden_domain::ID;
use taskwarden_infra::TaskwardenContext;

pub async fn mark_all_notifications_read_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskwardenContext>,
) -> Result<HttpResponse, TaskwardenError> {
    let usecase = MarkAllNotificationsReadUseCase {
        user_id: path_params.user_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|count| HttpResponse::Ok().json(APIResponse::new(count)))
        .map_err(TaskwardenError::from)
}

#[derive(Debug)]
pub struct MarkAllNotificationsReadUseCase {
    pub user_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for TaskwardenError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkAllNotificationsReadUseCase {
    type Response = usize;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkAllNotificationsRead";

    async fn execute(&mut self, ctx: &TaskwardenContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx.repos.notifications.mark_all_read(&self.user_id).await)
    }
}

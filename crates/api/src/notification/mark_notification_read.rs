use crate::error::TaskwardenError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskwarden_api_structs::mark_notification_read::*;
use taskwarden_domain::{Notification, ID};
use taskwarden_infra::TaskwardenContext;

pub async fn mark_notification_read_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<TaskwardenContext>,
) -> Result<HttpResponse, TaskwardenError> {
    let usecase = MarkNotificationReadUseCase {
        notification_id: path_params.notification_id.clone(),
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(TaskwardenError::from)
}

#[derive(Debug)]
pub struct MarkNotificationReadUseCase {
    pub notification_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for TaskwardenError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(notification_id) => Self::NotFound(format!(
                "The notification with id: {}, was not found.",
                notification_id
            )),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationReadUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationRead";

    async fn execute(&mut self, ctx: &TaskwardenContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .mark_read(&self.notification_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))
    }
}

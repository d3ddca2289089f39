use crate::error::TaskwardenError;
use crate::shared::usecase::{execute, UseCase};
use actix_web::{web, HttpResponse};
use taskwarden_api_structs::get_notifications::*;
use taskwarden_domain::{Notification, ID};
use taskwarden_infra::TaskwardenContext;

const DEFAULT_LIMIT: usize = 50;

pub async fn get_notifications_controller(
    path_params: web::Path<PathParams>,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<TaskwardenContext>,
) -> Result<HttpResponse, TaskwardenError> {
    let usecase = GetNotificationsUseCase {
        user_id: path_params.user_id.clone(),
        limit: query_params.limit.unwrap_or(DEFAULT_LIMIT),
        unread_only: query_params.unread_only.unwrap_or(false),
    };

    execute(usecase, &ctx)
        .await
        .map(|notifications| HttpResponse::Ok().json(APIResponse::new(notifications)))
        .map_err(TaskwardenError::from)
}

#[derive(Debug)]
pub struct GetNotificationsUseCase {
    pub user_id: ID,
    pub limit: usize,
    pub unread_only: bool,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for TaskwardenError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetNotificationsUseCase {
    type Response = Vec<Notification>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetNotifications";

    async fn execute(&mut self, ctx: &TaskwardenContext) -> Result<Self::Response, Self::Error> {
        Ok(ctx
            .repos
            .notifications
            .find_by_user(&self.user_id, self.unread_only, self.limit)
            .await)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use taskwarden_domain::NotificationType;
    use taskwarden_infra::setup_context_inmemory;

    fn notification_factory(user_id: &ID, timestamp: i64, read: bool) -> Notification {
        Notification {
            id: Default::default(),
            user_id: user_id.clone(),
            notification_type: NotificationType::Deadline,
            title: "Deadline approaching!".into(),
            message: "Prepare audit is due in 5 hours".into(),
            task_id: None,
            project_id: None,
            timestamp,
            read,
        }
    }

    #[actix_web::test]
    async fn returns_newest_notifications_first() {
        let ctx = setup_context_inmemory();
        let user_id = ID::default();
        for (timestamp, read) in &[(100, false), (300, true), (200, false)] {
            let notification = notification_factory(&user_id, *timestamp, *read);
            ctx.repos.notifications.insert(&notification).await.unwrap();
        }

        let usecase = GetNotificationsUseCase {
            user_id: user_id.clone(),
            limit: 50,
            unread_only: false,
        };
        let notifications = execute(usecase, &ctx).await.unwrap();
        assert_eq!(notifications.len(), 3);
        assert_eq!(notifications[0].timestamp, 300);

        let usecase = GetNotificationsUseCase {
            user_id,
            limit: 50,
            unread_only: true,
        };
        let notifications = execute(usecase, &ctx).await.unwrap();
        assert_eq!(notifications.len(), 2);
        assert!(notifications.iter().all(|n| !n.read));
    }
}

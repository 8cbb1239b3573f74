use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::delete_notification::{APIResponse, PathParams};
use helsa_notify_domain::{Notification, ID};
use helsa_notify_infra::HelsaContext;

pub async fn delete_notification_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteNotificationUseCase {
        notification_id: path_params.notification_id.clone(),
        owner_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|notification| HttpResponse::Ok().json(APIResponse::new(notification)))
        .map_err(HelsaError::from)
}

#[derive(Debug)]
pub struct DeleteNotificationUseCase {
    pub notification_id: ID,
    pub owner_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
}

impl From<UseCaseError> for HelsaError {
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
impl UseCase for DeleteNotificationUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteNotification";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .delete(&self.notification_id, &self.owner_id)
            .await
            .ok_or_else(|| UseCaseError::NotFound(self.notification_id.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helsa_notify_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn deletes_owned_notification_only() {
        let ctx = setup_context_inmemory();
        let owner_id = ID::default();

        let notification =
            Notification::sent(owner_id.clone(), "Lab results ready".into(), "".into(), None, 10);
        ctx.repos.notifications.insert(&notification).await.unwrap();

        let usecase = DeleteNotificationUseCase {
            notification_id: notification.id.clone(),
            owner_id: ID::default(),
        };
        assert!(execute(usecase, &ctx).await.is_err());

        let usecase = DeleteNotificationUseCase {
            notification_id: notification.id.clone(),
            owner_id: owner_id.clone(),
        };
        assert!(execute(usecase, &ctx).await.is_ok());
        assert!(ctx.repos.notifications.find_by_owner(&owner_id).await.is_empty());
    }
}

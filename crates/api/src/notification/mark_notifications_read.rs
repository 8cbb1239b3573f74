use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::mark_notifications_read::{APIResponse, RequestBody};
use helsa_notify_domain::{Notification, ID};
use helsa_notify_infra::HelsaContext;

pub async fn mark_notifications_read_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = MarkNotificationsReadUseCase {
        owner_id: user.id,
        notification_ids: body.0.notification_ids,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.0, res.1)))
        .map_err(HelsaError::from)
}

#[derive(Debug)]
pub struct MarkNotificationsReadUseCase {
    pub owner_id: ID,
    pub notification_ids: Vec<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkNotificationsReadUseCase {
    type Response = (Vec<Notification>, usize);

    type Error = UseCaseError;

    const NAME: &'static str = "MarkNotificationsRead";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .mark_many_read(&self.owner_id, &self.notification_ids)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let notifications = ctx.repos.notifications.find_by_owner(&self.owner_id).await;
        let unread_count = notifications.iter().filter(|n| !n.is_read).count();
        Ok((notifications, unread_count))
    }
}

use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::delete_all_notifications::APIResponse;
use helsa_notify_domain::ID;
use helsa_notify_infra::HelsaContext;

pub async fn delete_all_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteAllNotificationsUseCase { owner_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|deleted_count| HttpResponse::Ok().json(APIResponse { deleted_count }))
        .map_err(HelsaError::from)
}

/// Unconditional bulk delete, confirming intent is the caller's
/// responsibility
#[derive(Debug)]
pub struct DeleteAllNotificationsUseCase {
    pub owner_id: ID,
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
impl UseCase for DeleteAllNotificationsUseCase {
    type Response = i64;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteAllNotifications";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .notifications
            .delete_by_owner(&self.owner_id)
            .await
            .map(|res| res.deleted_count)
            .map_err(|_| UseCaseError::StorageError)
    }
}

use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::list_notifications::APIResponse;
use helsa_notify_domain::{Notification, ID};
use helsa_notify_infra::HelsaContext;

pub async fn list_notifications_controller(
    http_req: HttpRequest,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = ListNotificationsUseCase { owner_id: user.id };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.notifications, res.unread_count)))
        .map_err(HelsaError::from)
}

#[derive(Debug)]
pub struct ListNotificationsUseCase {
    pub owner_id: ID,
}

#[derive(Debug)]
pub struct OwnerNotifications {
    pub notifications: Vec<Notification>,
    pub unread_count: usize,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for ListNotificationsUseCase {
    type Response = OwnerNotifications;

    type Error = UseCaseError;

    const NAME: &'static str = "ListNotifications";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let notifications = ctx.repos.notifications.find_by_owner(&self.owner_id).await;
        let unread_count = notifications.iter().filter(|n| !n.is_read).count();

        Ok(OwnerNotifications {
            notifications,
            unread_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helsa_notify_infra::setup_context_inmemory;

    #[actix_web::main]
    #[test]
    async fn lists_only_the_owners_notifications_with_unread_count() {
        let ctx = setup_context_inmemory();
        let owner_id = ID::default();
        let other_owner = ID::default();

        let unread =
            Notification::sent(owner_id.clone(), "Lab results ready".into(), "".into(), None, 10);
        let mut read =
            Notification::sent(owner_id.clone(), "Period Started".into(), "".into(), None, 20);
        read.is_read = true;
        let foreign =
            Notification::sent(other_owner.clone(), "Lab results ready".into(), "".into(), None, 30);
        for n in [&unread, &read, &foreign] {
            ctx.repos.notifications.insert(n).await.unwrap();
        }

        let usecase = ListNotificationsUseCase {
            owner_id: owner_id.clone(),
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.notifications.len(), 2);
        assert_eq!(res.unread_count, 1);
        // Newest first
        assert_eq!(res.notifications[0].created_at, 20);
    }
}

use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::get_upcoming_reminders::{APIResponse, QueryParams};
use helsa_notify_domain::{Reminder, ReminderCategory, ID};
use helsa_notify_infra::HelsaContext;

pub async fn get_upcoming_reminders_controller(
    http_req: HttpRequest,
    query_params: web::Query<QueryParams>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = GetUpcomingRemindersUseCase {
        owner_id: user.id,
        exclude_category: query_params.exclude_category,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminders| HttpResponse::Ok().json(APIResponse::new(reminders)))
        .map_err(HelsaError::from)
}

#[derive(Debug)]
pub struct GetUpcomingRemindersUseCase {
    pub owner_id: ID,
    pub exclude_category: Option<ReminderCategory>,
}

#[derive(Debug)]
pub enum UseCaseError {}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {}
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetUpcomingRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetUpcomingReminders";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let mut reminders = ctx
            .repos
            .reminders
            .find_upcoming_by_owner(&self.owner_id, now)
            .await;

        if let Some(excluded) = self.exclude_category {
            reminders.retain(|r| r.category != excluded);
        }

        Ok(reminders)
    }
}

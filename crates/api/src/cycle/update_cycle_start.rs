use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use helsa_notify_api_structs::update_cycle_start::{APIResponse, RequestBody};
use helsa_notify_domain::{
    CyclePreferences, InvalidCycleProfileError, CYCLE_STARTED_TITLE, CYCLE_UPCOMING_TITLE, ID,
};
use helsa_notify_infra::HelsaContext;

use super::{record_cycle_start::CycleRegistration, register_cycle_notifications};

pub async fn update_cycle_start_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateCycleStartUseCase {
        owner_id: user.id,
        corrected_start_date: body.start_date,
        cycle_length_days: body.cycle_length_days,
        event_duration_days: body.event_duration_days,
        preferences: body.preferences,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse::new(res.profile, res.scheduled_notifications))
        })
        .map_err(HelsaError::from)
}

/// Correction path: stale cycle notifications and their pending jobs
/// are purged by the fixed title convention before the corrected date
/// is appended and the offsets regenerated, so the owner ends up with
/// exactly the new set.
#[derive(Debug)]
pub struct UpdateCycleStartUseCase {
    pub owner_id: ID,
    pub corrected_start_date: NaiveDate,
    pub cycle_length_days: i64,
    pub event_duration_days: i64,
    pub preferences: CyclePreferences,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound,
    InvalidProfile(InvalidCycleProfileError),
    StorageError,
}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => {
                Self::NotFound("No cycle profile found for this user.".into())
            }
            UseCaseError::InvalidProfile(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateCycleStartUseCase {
    type Response = CycleRegistration;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateCycleStart";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let mut profile = ctx
            .repos
            .cycle_profiles
            .find_by_owner(&self.owner_id)
            .await
            .ok_or(UseCaseError::NotFound)?;

        let cycle_titles = [CYCLE_UPCOMING_TITLE, CYCLE_STARTED_TITLE];
        ctx.repos
            .notifications
            .delete_by_owner_and_titles(&self.owner_id, &cycle_titles)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .scheduled_jobs
            .delete_unreferenced_by_titles(&self.owner_id, &cycle_titles)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        profile.cycle_length_days = self.cycle_length_days;
        profile.event_duration_days = self.event_duration_days;
        profile.preferences = self.preferences;
        profile.record_start(self.corrected_start_date);
        profile.validate().map_err(UseCaseError::InvalidProfile)?;

        ctx.repos
            .cycle_profiles
            .save(&profile)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let scheduled_notifications = register_cycle_notifications(&profile, ctx).await;

        Ok(CycleRegistration {
            profile,
            scheduled_notifications,
        })
    }
}

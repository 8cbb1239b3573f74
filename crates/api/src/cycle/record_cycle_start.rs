use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use chrono::NaiveDate;
use helsa_notify_api_structs::record_cycle_start::{APIResponse, RequestBody};
use helsa_notify_domain::{CyclePreferences, CycleProfile, InvalidCycleProfileError, ID};
use helsa_notify_infra::HelsaContext;

use super::register_cycle_notifications;

pub async fn record_cycle_start_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = RecordCycleStartUseCase {
        owner_id: user.id,
        start_date: body.start_date,
        cycle_length_days: body.cycle_length_days,
        event_duration_days: body.event_duration_days,
        preferences: body.preferences,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Created().json(APIResponse::new(res.profile, res.scheduled_notifications))
        })
        .map_err(HelsaError::from)
}

#[derive(Debug)]
pub struct RecordCycleStartUseCase {
    pub owner_id: ID,
    pub start_date: NaiveDate,
    pub cycle_length_days: i64,
    pub event_duration_days: i64,
    pub preferences: CyclePreferences,
}

#[derive(Debug)]
pub struct CycleRegistration {
    pub profile: CycleProfile,
    pub scheduled_notifications: usize,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidProfile(InvalidCycleProfileError),
    StorageError,
}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidProfile(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RecordCycleStartUseCase {
    type Response = CycleRegistration;

    type Error = UseCaseError;

    const NAME: &'static str = "RecordCycleStart";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let existing = ctx.repos.cycle_profiles.find_by_owner(&self.owner_id).await;

        let profile = match existing {
            Some(mut profile) => {
                profile.cycle_length_days = self.cycle_length_days;
                profile.event_duration_days = self.event_duration_days;
                profile.preferences = self.preferences;
                profile.record_start(self.start_date);
                profile.validate().map_err(UseCaseError::InvalidProfile)?;
                ctx.repos
                    .cycle_profiles
                    .save(&profile)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                profile
            }
            None => {
                let profile = CycleProfile::new(
                    self.owner_id.clone(),
                    self.start_date,
                    self.cycle_length_days,
                    self.event_duration_days,
                    self.preferences,
                );
                profile.validate().map_err(UseCaseError::InvalidProfile)?;
                ctx.repos
                    .cycle_profiles
                    .insert(&profile)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                profile
            }
        };

        let scheduled_notifications = register_cycle_notifications(&profile, ctx).await;

        Ok(CycleRegistration {
            profile,
            scheduled_notifications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helsa_notify_infra::{setup_context_inmemory, ISys};
    use std::sync::Arc;

    /// 2025-01-01T00:00:00Z
    struct StaticSys;
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            1735689600000
        }
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().expect("Valid date")
    }

    fn at_nine_utc(s: &str) -> i64 {
        date(s)
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc()
            .timestamp_millis()
    }

    fn usecase_factory(owner_id: &ID) -> RecordCycleStartUseCase {
        RecordCycleStartUseCase {
            owner_id: owner_id.clone(),
            start_date: date("2025-01-01"),
            cycle_length_days: 28,
            event_duration_days: 5,
            preferences: CyclePreferences {
                seven_days_before: true,
                three_days_before: true,
                one_day_before: true,
                on_start_date: true,
            },
        }
    }

    #[actix_web::main]
    #[test]
    async fn registers_one_notification_per_enabled_offset() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();

        let res = execute(usecase_factory(&owner_id), &ctx).await.unwrap();
        assert_eq!(res.profile.next_event_date, date("2025-01-29"));
        assert_eq!(res.scheduled_notifications, 4);

        let mut due_ats = ctx
            .repos
            .scheduled_jobs
            .find_due(i64::MAX)
            .await
            .into_iter()
            .map(|job| job.due_at)
            .collect::<Vec<_>>();
        due_ats.sort_unstable();
        assert_eq!(
            due_ats,
            vec![
                at_nine_utc("2025-01-22"),
                at_nine_utc("2025-01-26"),
                at_nine_utc("2025-01-28"),
                at_nine_utc("2025-01-29"),
            ]
        );
    }

    #[actix_web::main]
    #[test]
    async fn disabled_offsets_are_not_registered() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();

        let mut usecase = usecase_factory(&owner_id);
        usecase.preferences = CyclePreferences {
            seven_days_before: false,
            three_days_before: true,
            one_day_before: false,
            on_start_date: true,
        };
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.scheduled_notifications, 2);
        assert_eq!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.len(), 2);
    }

    #[actix_web::main]
    #[test]
    async fn stale_offsets_are_skipped() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();

        // Start recorded 26 days ago: next event is in 2 days, the
        // 7 and 3 day offsets already lie in the past
        let mut usecase = usecase_factory(&owner_id);
        usecase.start_date = date("2024-12-06");
        let res = execute(usecase, &ctx).await.unwrap();
        assert_eq!(res.profile.next_event_date, date("2025-01-03"));
        assert_eq!(res.scheduled_notifications, 2);
    }

    #[actix_web::main]
    #[test]
    async fn rejects_out_of_range_lengths() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();

        let mut usecase = usecase_factory(&owner_id);
        usecase.cycle_length_days = 5;
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidProfile(
                InvalidCycleProfileError::CycleLength(5)
            ))
        ));
    }
}

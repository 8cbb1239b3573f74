use crate::{
    error::HelsaError,
    notification::schedule_notification::ScheduleNotificationUseCase,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::create_reminder::{APIResponse, RequestBody};
use helsa_notify_domain::{InvalidReminderError, Reminder, ReminderCategory, ID};
use helsa_notify_infra::HelsaContext;

pub async fn create_reminder_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = CreateReminderUseCase {
        owner_id: user.id,
        title: body.title,
        message: body.message.unwrap_or_default(),
        category: body.category.unwrap_or_default(),
        fire_at: body.fire_at,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Created().json(APIResponse::new(reminder)))
        .map_err(HelsaError::from)
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: ID,
    pub title: String,
    pub message: String,
    pub category: ReminderCategory,
    pub fire_at: i64,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder::new(
            self.owner_id.clone(),
            self.title.clone(),
            self.message.clone(),
            self.category,
            self.fire_at,
            now,
        );
        reminder.validate().map_err(UseCaseError::InvalidReminder)?;

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // The reminder write and the job registration are not
        // transactional. A registration failure is logged by the
        // usecase runner and healed on the next edit or delete.
        let schedule_notification = ScheduleNotificationUseCase {
            owner_id: reminder.owner_id.clone(),
            title: reminder.title.clone(),
            message: reminder.message.clone(),
            deliver_at: reminder.fire_at,
            reminder_ref: Some(reminder.id.clone()),
        };
        let _ = execute(schedule_notification, ctx).await;

        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helsa_notify_domain::User;
    use helsa_notify_infra::{setup_context_inmemory, InMemoryPushGateway, ISys};
    use std::sync::Arc;

    struct StaticSys;
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            1000
        }
    }

    fn usecase_factory(owner_id: &ID, fire_at: i64) -> CreateReminderUseCase {
        CreateReminderUseCase {
            owner_id: owner_id.clone(),
            title: "Take iron supplement".into(),
            message: "With breakfast".into(),
            category: ReminderCategory::Medication,
            fire_at,
        }
    }

    #[actix_web::main]
    #[test]
    async fn rejects_invalid_title() {
        let ctx = setup_context_inmemory();
        let mut usecase = usecase_factory(&ID::default(), 5000);
        usecase.title = "".into();
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidReminder(
                InvalidReminderError::EmptyTitle
            ))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn future_reminder_registers_one_job_and_one_pending_record() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();

        let reminder = execute(usecase_factory(&owner_id, 5000), &ctx).await.unwrap();

        let jobs = ctx.repos.scheduled_jobs.find_due(i64::MAX).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].payload.reminder_ref, Some(reminder.id.clone()));

        let records = ctx.repos.notifications.find_by_owner(&owner_id).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scheduled_at, Some(reminder.fire_at));
        assert!(!records[0].is_read);
    }

    #[actix_web::main]
    #[test]
    async fn past_reminder_dispatches_inline_without_a_job() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let push = Arc::new(InMemoryPushGateway::new());
        ctx.push_gateway = push.clone();

        let user = User::new(Default::default(), Some("fcm:device-token-1".into()));
        ctx.repos.users.insert(&user).await.unwrap();

        let reminder = execute(usecase_factory(&user.id, 1000), &ctx).await.unwrap();

        assert!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.is_empty());
        assert_eq!(push.sent_count(), 1);

        let records = ctx.repos.notifications.find_by_owner(&user.id).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scheduled_at, None);
        assert_eq!(records[0].reminder_ref, Some(reminder.id.clone()));
    }
}

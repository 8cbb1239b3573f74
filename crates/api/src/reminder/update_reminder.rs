use crate::{
    error::HelsaError,
    notification::schedule_notification::ScheduleNotificationUseCase,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::update_reminder::{APIResponse, PathParams, RequestBody};
use helsa_notify_domain::{InvalidReminderError, Reminder, ReminderCategory, ID};
use helsa_notify_infra::HelsaContext;

pub async fn update_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let body = body.0;
    let usecase = UpdateReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        owner_id: user.id,
        title: body.title,
        message: body.message,
        category: body.category,
        fire_at: body.fire_at,
        completed: body.completed,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(HelsaError::from)
}

#[derive(Debug)]
pub struct UpdateReminderUseCase {
    pub reminder_id: ID,
    pub owner_id: ID,
    pub title: Option<String>,
    pub message: Option<String>,
    pub category: Option<ReminderCategory>,
    pub fire_at: Option<i64>,
    pub completed: Option<bool>,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    InvalidReminder(InvalidReminderError),
    StorageError,
}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::InvalidReminder(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateReminder";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.owner_id == self.owner_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        if let Some(title) = &self.title {
            reminder.title = title.clone();
        }
        if let Some(message) = &self.message {
            reminder.message = message.clone();
        }
        if let Some(category) = self.category {
            reminder.category = category;
        }
        reminder.validate().map_err(UseCaseError::InvalidReminder)?;

        let fire_at_changed = matches!(self.fire_at, Some(fire_at) if fire_at != reminder.fire_at);
        // `completed: false` is a no-op, the flag only flips one way
        let completing = self.completed == Some(true) && !reminder.sent;

        if fire_at_changed || completing {
            // Cancel before re-registering so there is never more than
            // one pending job for this reminder
            ctx.repos
                .scheduled_jobs
                .delete_by_reminder(&reminder.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        if completing {
            reminder.mark_sent();
            ctx.repos
                .notifications
                .delete_by_reminder(&reminder.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        if let Some(fire_at) = self.fire_at {
            reminder.fire_at = fire_at;
        }

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if fire_at_changed && !reminder.sent {
            let schedule_notification = ScheduleNotificationUseCase {
                owner_id: reminder.owner_id.clone(),
                title: reminder.title.clone(),
                message: reminder.message.clone(),
                deliver_at: reminder.fire_at,
                reminder_ref: Some(reminder.id.clone()),
            };
            let _ = execute(schedule_notification, ctx).await;
        }

        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::create_reminder::CreateReminderUseCase;
    use helsa_notify_infra::{setup_context_inmemory, ISys};
    use std::sync::Arc;

    struct StaticSys;
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            1000
        }
    }

    async fn create_reminder(ctx: &HelsaContext, owner_id: &ID, fire_at: i64) -> Reminder {
        let usecase = CreateReminderUseCase {
            owner_id: owner_id.clone(),
            title: "Take iron supplement".into(),
            message: "".into(),
            category: ReminderCategory::Medication,
            fire_at,
        };
        execute(usecase, ctx).await.unwrap()
    }

    fn update_factory(reminder_id: &ID, owner_id: &ID) -> UpdateReminderUseCase {
        UpdateReminderUseCase {
            reminder_id: reminder_id.clone(),
            owner_id: owner_id.clone(),
            title: None,
            message: None,
            category: None,
            fire_at: None,
            completed: None,
        }
    }

    #[actix_web::main]
    #[test]
    async fn does_not_leak_other_owners_reminders() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();
        let reminder = create_reminder(&ctx, &owner_id, 5000).await;

        let usecase = update_factory(&reminder.id, &ID::default());
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
    }

    #[actix_web::main]
    #[test]
    async fn reschedule_keeps_exactly_one_pending_job_and_record() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();
        let reminder = create_reminder(&ctx, &owner_id, 5000).await;

        let mut usecase = update_factory(&reminder.id, &owner_id);
        usecase.fire_at = Some(9000);
        let updated = execute(usecase, &ctx).await.unwrap();
        assert_eq!(updated.fire_at, 9000);

        let jobs = ctx.repos.scheduled_jobs.find_due(i64::MAX).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].due_at, 9000);

        let records = ctx.repos.notifications.find_by_owner(&owner_id).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scheduled_at, Some(9000));
    }

    #[actix_web::main]
    #[test]
    async fn completion_cancels_job_and_pending_record() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();
        let reminder = create_reminder(&ctx, &owner_id, 5000).await;

        let mut usecase = update_factory(&reminder.id, &owner_id);
        usecase.completed = Some(true);
        let updated = execute(usecase, &ctx).await.unwrap();
        assert!(updated.sent);

        assert!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.is_empty());
        assert!(ctx.repos.notifications.find_by_owner(&owner_id).await.is_empty());

        // Un-completing is a no-op
        let mut usecase = update_factory(&reminder.id, &owner_id);
        usecase.completed = Some(false);
        let updated = execute(usecase, &ctx).await.unwrap();
        assert!(updated.sent);
    }

    #[actix_web::main]
    #[test]
    async fn rescheduling_a_completed_reminder_does_not_reregister() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();
        let reminder = create_reminder(&ctx, &owner_id, 5000).await;

        let mut usecase = update_factory(&reminder.id, &owner_id);
        usecase.completed = Some(true);
        execute(usecase, &ctx).await.unwrap();

        let mut usecase = update_factory(&reminder.id, &owner_id);
        usecase.fire_at = Some(9000);
        execute(usecase, &ctx).await.unwrap();

        assert!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.is_empty());
    }
}

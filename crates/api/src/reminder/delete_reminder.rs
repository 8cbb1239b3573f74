use crate::{
    error::HelsaError,
    shared::{
        auth::protect_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use helsa_notify_api_structs::delete_reminder::{APIResponse, PathParams};
use helsa_notify_domain::{Reminder, ID};
use helsa_notify_infra::HelsaContext;

pub async fn delete_reminder_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<HelsaContext>,
) -> Result<HttpResponse, HelsaError> {
    let user = protect_route(&http_req, &ctx).await?;

    let usecase = DeleteReminderUseCase {
        reminder_id: path_params.reminder_id.clone(),
        owner_id: user.id,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(HelsaError::from)
}

/// Deleting a reminder must leave no orphans behind: pending jobs and
/// notification records referencing it go with it.
#[derive(Debug)]
pub struct DeleteReminderUseCase {
    pub reminder_id: ID,
    pub owner_id: ID,
}

#[derive(Debug)]
pub enum UseCaseError {
    NotFound(ID),
    StorageError,
}

impl From<UseCaseError> for HelsaError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DeleteReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteReminder";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) if reminder.owner_id == self.owner_id => reminder,
            _ => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        ctx.repos
            .scheduled_jobs
            .delete_by_reminder(&reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos
            .notifications
            .delete_by_reminder(&reminder.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        ctx.repos.reminders.delete(&reminder.id).await;

        Ok(reminder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminder::create_reminder::CreateReminderUseCase;
    use helsa_notify_domain::ReminderCategory;
    use helsa_notify_infra::{setup_context_inmemory, ISys};
    use std::sync::Arc;

    struct StaticSys;
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            1000
        }
    }

    #[actix_web::main]
    #[test]
    async fn delete_leaves_no_orphaned_jobs_or_records() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();

        let usecase = CreateReminderUseCase {
            owner_id: owner_id.clone(),
            title: "Take iron supplement".into(),
            message: "".into(),
            category: ReminderCategory::Medication,
            fire_at: 5000,
        };
        let reminder = execute(usecase, &ctx).await.unwrap();
        assert_eq!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.len(), 1);
        assert_eq!(ctx.repos.notifications.find_by_owner(&owner_id).await.len(), 1);

        let usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            owner_id: owner_id.clone(),
        };
        execute(usecase, &ctx).await.unwrap();

        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
        assert!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.is_empty());
        assert!(ctx.repos.notifications.find_by_owner(&owner_id).await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn wrong_owner_cannot_delete() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let owner_id = ID::default();

        let usecase = CreateReminderUseCase {
            owner_id: owner_id.clone(),
            title: "Take iron supplement".into(),
            message: "".into(),
            category: ReminderCategory::Medication,
            fire_at: 5000,
        };
        let reminder = execute(usecase, &ctx).await.unwrap();

        let usecase = DeleteReminderUseCase {
            reminder_id: reminder.id.clone(),
            owner_id: ID::default(),
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NotFound(_))
        ));
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_some());
    }
}

use crate::shared::usecase::{execute, UseCase};
use helsa_notify_domain::{JobPayload, Notification, ScheduledJob, ID};
use helsa_notify_infra::HelsaContext;

use super::send_notification::SendNotificationUseCase;

/// Registers "notify the owner at `deliver_at`". Past or present
/// targets dispatch inline without touching the job store, future
/// targets become a durable `ScheduledJob` picked up by the dispatcher
/// poll loop.
#[derive(Debug)]
pub struct ScheduleNotificationUseCase {
    pub owner_id: ID,
    pub title: String,
    pub message: String,
    /// Timestamp in millis at which the owner should be notified
    pub deliver_at: i64,
    pub reminder_ref: Option<ID>,
}

#[derive(Debug)]
pub enum ScheduleOutcome {
    /// `deliver_at` had already passed, delivery was attempted inline
    Dispatched,
    /// A durable job was registered
    Scheduled(ID),
}

#[derive(Debug)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for ScheduleNotificationUseCase {
    type Response = ScheduleOutcome;

    type Error = UseCaseError;

    const NAME: &'static str = "ScheduleNotification";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        if self.deliver_at <= now {
            let send_notification = SendNotificationUseCase {
                owner_id: self.owner_id.clone(),
                title: self.title.clone(),
                message: self.message.clone(),
                reminder_ref: self.reminder_ref.clone(),
            };

            // Delivery is best-effort here, failures are logged by the
            // usecase runner and never surfaced to the caller that
            // triggered the inline dispatch
            let _ = execute(send_notification, ctx).await;

            return Ok(ScheduleOutcome::Dispatched);
        }

        let job = ScheduledJob::new(
            self.deliver_at,
            JobPayload {
                owner_id: self.owner_id.clone(),
                title: self.title.clone(),
                message: self.message.clone(),
                reminder_ref: self.reminder_ref.clone(),
            },
        );
        ctx.repos
            .scheduled_jobs
            .insert(&job)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        if self.reminder_ref.is_some() {
            let pending = Notification::pending(
                self.owner_id.clone(),
                self.title.clone(),
                self.message.clone(),
                self.reminder_ref.clone(),
                self.deliver_at,
                now,
            );
            ctx.repos
                .notifications
                .upsert_by_reminder(&pending)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        Ok(ScheduleOutcome::Scheduled(job.id))
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

    #[actix_web::main]
    #[test]
    async fn future_target_registers_job_and_pending_record() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let reminder_ref = ID::default();
        let owner_id = ID::default();

        let usecase = ScheduleNotificationUseCase {
            owner_id: owner_id.clone(),
            title: "Refill prescription".into(),
            message: "".into(),
            deliver_at: 5000,
            reminder_ref: Some(reminder_ref.clone()),
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(matches!(outcome, ScheduleOutcome::Scheduled(_)));

        let jobs = ctx.repos.scheduled_jobs.find_due(i64::MAX).await;
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].due_at, 5000);

        let records = ctx.repos.notifications.find_by_owner(&owner_id).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scheduled_at, Some(5000));
        assert!(!records[0].is_read);
    }

    #[actix_web::main]
    #[test]
    async fn past_target_dispatches_inline_without_a_job() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys);
        let push = Arc::new(InMemoryPushGateway::new());
        ctx.push_gateway = push.clone();

        let user = User::new(Default::default(), Some("fcm:device-token-1".into()));
        ctx.repos.users.insert(&user).await.unwrap();

        let usecase = ScheduleNotificationUseCase {
            owner_id: user.id.clone(),
            title: "Refill prescription".into(),
            message: "".into(),
            deliver_at: 1000,
            reminder_ref: None,
        };
        let outcome = execute(usecase, &ctx).await.unwrap();
        assert!(matches!(outcome, ScheduleOutcome::Dispatched));

        assert!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.is_empty());
        assert_eq!(push.sent_count(), 1);

        // Immediate dispatch still leaves a record behind
        let records = ctx.repos.notifications.find_by_owner(&user.id).await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].scheduled_at, None);
    }
}

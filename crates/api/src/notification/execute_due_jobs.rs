use crate::shared::usecase::{execute, UseCase};
use helsa_notify_domain::JobKind;
use helsa_notify_infra::HelsaContext;
use tracing::{error, warn};

use super::send_notification::SendNotificationUseCase;

/// One dispatcher poll tick: fetch every job that has become due and
/// execute it. A job is deleted on success, kept for the next tick
/// with an incremented failure count on failure, and dropped outright
/// once the failure cutoff is reached.
///
/// Errors are isolated per job, one failing job never blocks the rest
/// of the tick.
#[derive(Debug)]
pub struct ExecuteDueJobsUseCase {}

#[derive(Debug, Default, PartialEq)]
pub struct DispatchedJobs {
    pub executed: usize,
    pub failed: usize,
    pub dropped: usize,
}

#[derive(Debug)]
pub enum UseCaseError {}

#[async_trait::async_trait(?Send)]
impl UseCase for ExecuteDueJobsUseCase {
    type Response = DispatchedJobs;

    type Error = UseCaseError;

    const NAME: &'static str = "ExecuteDueJobs";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        let due_jobs = ctx.repos.scheduled_jobs.find_due(now).await;

        let mut stats = DispatchedJobs::default();
        for mut job in due_jobs {
            let res = match job.kind {
                JobKind::SendNotification => {
                    let send_notification = SendNotificationUseCase {
                        owner_id: job.payload.owner_id.clone(),
                        title: job.payload.title.clone(),
                        message: job.payload.message.clone(),
                        reminder_ref: job.payload.reminder_ref.clone(),
                    };
                    execute(send_notification, ctx).await.map(|_| ())
                }
            };

            match res {
                Ok(()) => {
                    ctx.repos.scheduled_jobs.delete(&job.id).await;
                    stats.executed += 1;
                }
                Err(_) => {
                    job.register_failure();
                    if job.is_poisoned() {
                        warn!(
                            "Dropping job: {} after {} failed executions",
                            job.id, job.fail_count
                        );
                        ctx.repos.scheduled_jobs.delete(&job.id).await;
                        stats.dropped += 1;
                    } else {
                        if let Err(e) = ctx.repos.scheduled_jobs.save(&job).await {
                            error!("Unable to persist failure count for job: {} {:?}", job.id, e);
                        }
                        stats.failed += 1;
                    }
                }
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::schedule_notification::ScheduleNotificationUseCase;
    use helsa_notify_domain::User;
    use helsa_notify_infra::{setup_context_inmemory, InMemoryPushGateway, ISys};
    use std::sync::Arc;

    struct StaticSys(i64);
    impl ISys for StaticSys {
        fn get_timestamp_millis(&self) -> i64 {
            self.0
        }
    }

    async fn schedule(ctx: &helsa_notify_infra::HelsaContext, owner_id: &helsa_notify_domain::ID) {
        let usecase = ScheduleNotificationUseCase {
            owner_id: owner_id.clone(),
            title: "Take iron supplement".into(),
            message: "".into(),
            deliver_at: 5000,
            reminder_ref: None,
        };
        execute(usecase, ctx).await.unwrap();
    }

    #[actix_web::main]
    #[test]
    async fn fires_due_jobs_and_leaves_future_ones() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys(1000));
        let push = Arc::new(InMemoryPushGateway::new());
        ctx.push_gateway = push.clone();

        let user = User::new(Default::default(), Some("fcm:device-token-1".into()));
        ctx.repos.users.insert(&user).await.unwrap();
        schedule(&ctx, &user.id).await;

        // Not due yet
        let stats = execute(ExecuteDueJobsUseCase {}, &ctx).await.unwrap();
        assert_eq!(stats, DispatchedJobs::default());
        assert_eq!(push.sent_count(), 0);

        // Tick past the due time
        ctx.sys = Arc::new(StaticSys(5000));
        let stats = execute(ExecuteDueJobsUseCase {}, &ctx).await.unwrap();
        assert_eq!(stats.executed, 1);
        assert_eq!(push.sent_count(), 1);
        assert!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.is_empty());
    }

    #[actix_web::main]
    #[test]
    async fn job_is_dropped_after_three_failures_and_never_runs_again() {
        let mut ctx = setup_context_inmemory();
        ctx.sys = Arc::new(StaticSys(1000));
        let push = Arc::new(InMemoryPushGateway::new());
        push.set_broken(true);
        ctx.push_gateway = push.clone();

        let user = User::new(Default::default(), Some("fcm:device-token-1".into()));
        ctx.repos.users.insert(&user).await.unwrap();
        schedule(&ctx, &user.id).await;

        ctx.sys = Arc::new(StaticSys(5000));

        let stats = execute(ExecuteDueJobsUseCase {}, &ctx).await.unwrap();
        assert_eq!(stats.failed, 1);
        let stats = execute(ExecuteDueJobsUseCase {}, &ctx).await.unwrap();
        assert_eq!(stats.failed, 1);

        // Third failure reaches the cutoff
        let stats = execute(ExecuteDueJobsUseCase {}, &ctx).await.unwrap();
        assert_eq!(stats.dropped, 1);
        assert!(ctx.repos.scheduled_jobs.find_due(i64::MAX).await.is_empty());

        // Gateway recovers but the job is gone, nothing fires
        push.set_broken(false);
        let stats = execute(ExecuteDueJobsUseCase {}, &ctx).await.unwrap();
        assert_eq!(stats, DispatchedJobs::default());
        assert_eq!(push.sent_count(), 0);
    }
}

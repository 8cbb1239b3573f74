use crate::{notification::execute_due_jobs::ExecuteDueJobsUseCase, shared::usecase::execute};
use actix_web::rt::time::interval;
use helsa_notify_infra::HelsaContext;
use std::time::Duration;

/// Spawns the dispatcher poll loop. Every tick runs one
/// `ExecuteDueJobsUseCase`, which fires all jobs that have become due
/// since the last tick.
///
/// The loop dies with the process, durability lives in the job store:
/// jobs that were due while the process was down are picked up by the
/// first tick after restart.
pub fn start_job_dispatcher(ctx: HelsaContext) {
    actix_web::rt::spawn(async move {
        let mut poll_interval = interval(Duration::from_secs(ctx.config.job_poll_interval_secs));
        loop {
            poll_interval.tick().await;
            let _ = execute(ExecuteDueJobsUseCase {}, &ctx).await;
        }
    });
}

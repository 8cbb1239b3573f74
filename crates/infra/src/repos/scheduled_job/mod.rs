mod inmemory;
mod postgres;

pub use inmemory::InMemoryScheduledJobRepo;
pub use postgres::PostgresScheduledJobRepo;

use crate::repos::shared::repo::DeleteResult;
use helsa_notify_domain::{ScheduledJob, ID};

#[async_trait::async_trait]
pub trait IScheduledJobRepo: Send + Sync {
    async fn insert(&self, job: &ScheduledJob) -> anyhow::Result<()>;
    async fn save(&self, job: &ScheduledJob) -> anyhow::Result<()>;
    async fn find(&self, job_id: &ID) -> Option<ScheduledJob>;
    /// All jobs with `due_at <= before_inc`. Backed by an index on
    /// `due_at`, this runs every poll tick.
    async fn find_due(&self, before_inc: i64) -> Vec<ScheduledJob>;
    async fn delete(&self, job_id: &ID) -> Option<ScheduledJob>;
    /// Cancels all pending jobs derived from the given `Reminder`
    async fn delete_by_reminder(&self, reminder_ref: &ID) -> anyhow::Result<DeleteResult>;
    /// Cancels pending jobs for the owner that carry no reminder
    /// reference and whose payload title is one of `titles`. Used to
    /// purge cycle generated jobs before regeneration.
    async fn delete_unreferenced_by_titles(
        &self,
        owner_id: &ID,
        titles: &[&str],
    ) -> anyhow::Result<DeleteResult>;
}

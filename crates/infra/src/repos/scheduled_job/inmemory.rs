use super::IScheduledJobRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use helsa_notify_domain::{ScheduledJob, ID};

pub struct InMemoryScheduledJobRepo {
    jobs: std::sync::Mutex<Vec<ScheduledJob>>,
}

impl InMemoryScheduledJobRepo {
    pub fn new() -> Self {
        Self {
            jobs: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IScheduledJobRepo for InMemoryScheduledJobRepo {
    async fn insert(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        insert(job, &self.jobs);
        Ok(())
    }

    async fn save(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        save(job, &self.jobs);
        Ok(())
    }

    async fn find(&self, job_id: &ID) -> Option<ScheduledJob> {
        find(job_id, &self.jobs)
    }

    async fn find_due(&self, before_inc: i64) -> Vec<ScheduledJob> {
        let mut due = find_by(&self.jobs, |job: &ScheduledJob| job.due_at <= before_inc);
        due.sort_by_key(|job| job.due_at);
        due
    }

    async fn delete(&self, job_id: &ID) -> Option<ScheduledJob> {
        delete(job_id, &self.jobs)
    }

    async fn delete_by_reminder(&self, reminder_ref: &ID) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.jobs, |job: &ScheduledJob| {
            job.payload.reminder_ref.as_ref() == Some(reminder_ref)
        });
        Ok(res)
    }

    async fn delete_unreferenced_by_titles(
        &self,
        owner_id: &ID,
        titles: &[&str],
    ) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.jobs, |job: &ScheduledJob| {
            job.payload.owner_id == *owner_id
                && job.payload.reminder_ref.is_none()
                && titles.contains(&job.payload.title.as_str())
        });
        Ok(res)
    }
}

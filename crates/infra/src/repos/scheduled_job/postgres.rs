use super::IScheduledJobRepo;
use crate::repos::shared::repo::DeleteResult;
use helsa_notify_domain::{JobKind, JobPayload, ScheduledJob, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;
use tracing::error;

pub struct PostgresScheduledJobRepo {
    pool: PgPool,
}

impl PostgresScheduledJobRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ScheduledJobRaw {
    job_uid: Uuid,
    due_at: i64,
    kind: String,
    owner_uid: Uuid,
    title: String,
    message: String,
    reminder_uid: Option<Uuid>,
    fail_count: i64,
}

impl From<ScheduledJobRaw> for ScheduledJob {
    fn from(raw: ScheduledJobRaw) -> Self {
        Self {
            id: raw.job_uid.into(),
            due_at: raw.due_at,
            kind: JobKind::from_str(&raw.kind).unwrap_or(JobKind::SendNotification),
            payload: JobPayload {
                owner_id: raw.owner_uid.into(),
                title: raw.title,
                message: raw.message,
                reminder_ref: raw.reminder_uid.map(|uid| uid.into()),
            },
            fail_count: raw.fail_count,
        }
    }
}

#[async_trait::async_trait]
impl IScheduledJobRepo for PostgresScheduledJobRepo {
    async fn insert(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO scheduled_jobs
            (job_uid, due_at, kind, owner_uid, title, message, reminder_uid, fail_count)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(job.id.inner_ref())
        .bind(job.due_at)
        .bind(job.kind.to_string())
        .bind(job.payload.owner_id.inner_ref())
        .bind(&job.payload.title)
        .bind(&job.payload.message)
        .bind(job.payload.reminder_ref.as_ref().map(|r| *r.inner_ref()))
        .bind(job.fail_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, job: &ScheduledJob) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE scheduled_jobs
            SET due_at = $2, fail_count = $3
            WHERE job_uid = $1
            "#,
        )
        .bind(job.id.inner_ref())
        .bind(job.due_at)
        .bind(job.fail_count)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, job_id: &ID) -> Option<ScheduledJob> {
        sqlx::query_as::<_, ScheduledJobRaw>(
            r#"
            SELECT * FROM scheduled_jobs
            WHERE job_uid = $1
            "#,
        )
        .bind(job_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|job| job.into())
    }

    async fn find_due(&self, before_inc: i64) -> Vec<ScheduledJob> {
        sqlx::query_as::<_, ScheduledJobRaw>(
            r#"
            SELECT * FROM scheduled_jobs AS j
            WHERE j.due_at <= $1
            ORDER BY j.due_at ASC
            "#,
        )
        .bind(before_inc)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|err| {
            error!("Unable to query due jobs: {:?}", err);
            Vec::new()
        })
        .into_iter()
        .map(|job| job.into())
        .collect()
    }

    async fn delete(&self, job_id: &ID) -> Option<ScheduledJob> {
        sqlx::query_as::<_, ScheduledJobRaw>(
            r#"
            DELETE FROM scheduled_jobs
            WHERE job_uid = $1
            RETURNING *
            "#,
        )
        .bind(job_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|job| job.into())
    }

    async fn delete_by_reminder(&self, reminder_ref: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM scheduled_jobs
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_ref.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete_unreferenced_by_titles(
        &self,
        owner_id: &ID,
        titles: &[&str],
    ) -> anyhow::Result<DeleteResult> {
        let titles = titles.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        let res = sqlx::query(
            r#"
            DELETE FROM scheduled_jobs
            WHERE owner_uid = $1 AND reminder_uid IS NULL AND title = ANY($2)
            "#,
        )
        .bind(owner_id.inner_ref())
        .bind(&titles)
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }
}

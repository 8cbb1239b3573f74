use super::INotificationRepo;
use crate::repos::shared::repo::DeleteResult;
use helsa_notify_domain::{Notification, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;

pub struct PostgresNotificationRepo {
    pool: PgPool,
}

impl PostgresNotificationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct NotificationRaw {
    notification_uid: Uuid,
    owner_uid: Uuid,
    title: String,
    message: String,
    is_read: bool,
    audience_role: Option<String>,
    scheduled_at: Option<i64>,
    reminder_uid: Option<Uuid>,
    created_at: i64,
}

impl From<NotificationRaw> for Notification {
    fn from(raw: NotificationRaw) -> Self {
        Self {
            id: raw.notification_uid.into(),
            owner_id: raw.owner_uid.into(),
            title: raw.title,
            message: raw.message,
            is_read: raw.is_read,
            audience_role: raw.audience_role,
            scheduled_at: raw.scheduled_at,
            reminder_ref: raw.reminder_uid.map(|uid| uid.into()),
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for PostgresNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications
            (notification_uid, owner_uid, title, message, is_read, audience_role, scheduled_at, reminder_uid, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.owner_id.inner_ref())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(&notification.audience_role)
        .bind(notification.scheduled_at)
        .bind(notification.reminder_ref.as_ref().map(|r| *r.inner_ref()))
        .bind(notification.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn upsert_by_reminder(
        &self,
        notification: &Notification,
    ) -> anyhow::Result<Notification> {
        let reminder_ref = notification
            .reminder_ref
            .clone()
            .ok_or_else(|| anyhow::anyhow!("Upsert by reminder requires a reminder reference"))?;

        // The partial unique index on reminder_uid makes the conflict
        // target valid and enforces at most one record per reminder
        let upserted = sqlx::query_as::<_, NotificationRaw>(
            r#"
            INSERT INTO notifications
            (notification_uid, owner_uid, title, message, is_read, audience_role, scheduled_at, reminder_uid, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT (reminder_uid) WHERE reminder_uid IS NOT NULL
            DO UPDATE SET
                title = EXCLUDED.title,
                message = EXCLUDED.message,
                is_read = EXCLUDED.is_read,
                audience_role = EXCLUDED.audience_role,
                scheduled_at = EXCLUDED.scheduled_at,
                created_at = EXCLUDED.created_at
            RETURNING *
            "#,
        )
        .bind(notification.id.inner_ref())
        .bind(notification.owner_id.inner_ref())
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(&notification.audience_role)
        .bind(notification.scheduled_at)
        .bind(reminder_ref.inner_ref())
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(upserted.into())
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications
            WHERE notification_uid = $1
            "#,
        )
        .bind(notification_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|notification| notification.into())
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            SELECT * FROM notifications AS n
            WHERE n.owner_uid = $1
            ORDER BY n.created_at DESC
            "#,
        )
        .bind(owner_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|err| {
            error!("Unable to query notifications: {:?}", err);
            Vec::new()
        })
        .into_iter()
        .map(|notification| notification.into())
        .collect()
    }

    async fn mark_read(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE notification_uid = $1 AND owner_uid = $2
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(owner_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|notification| notification.into())
    }

    async fn mark_many_read(&self, owner_id: &ID, notification_ids: &[ID]) -> anyhow::Result<()> {
        let ids = notification_ids
            .iter()
            .map(|id| *id.inner_ref())
            .collect::<Vec<_>>();
        sqlx::query(
            r#"
            UPDATE notifications
            SET is_read = TRUE
            WHERE owner_uid = $1 AND notification_uid = ANY($2)
            "#,
        )
        .bind(owner_id.inner_ref())
        .bind(&ids)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification> {
        sqlx::query_as::<_, NotificationRaw>(
            r#"
            DELETE FROM notifications
            WHERE notification_uid = $1 AND owner_uid = $2
            RETURNING *
            "#,
        )
        .bind(notification_id.inner_ref())
        .bind(owner_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|notification| notification.into())
    }

    async fn delete_by_owner(&self, owner_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE owner_uid = $1
            "#,
        )
        .bind(owner_id.inner_ref())
        .execute(&self.pool)
        .await?;
        Ok(DeleteResult {
            deleted_count: res.rows_affected() as i64,
        })
    }

    async fn delete_by_reminder(&self, reminder_ref: &ID) -> anyhow::Result<DeleteResult> {
        let res = sqlx::query(
            r#"
            DELETE FROM notifications
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

    async fn delete_by_owner_and_titles(
        &self,
        owner_id: &ID,
        titles: &[&str],
    ) -> anyhow::Result<DeleteResult> {
        let titles = titles.iter().map(|t| t.to_string()).collect::<Vec<_>>();
        let res = sqlx::query(
            r#"
            DELETE FROM notifications
            WHERE owner_uid = $1 AND title = ANY($2)
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

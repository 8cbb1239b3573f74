use super::IReminderRepo;
use helsa_notify_domain::{Reminder, ReminderCategory, ID};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::str::FromStr;
use tracing::error;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    owner_uid: Uuid,
    title: String,
    message: String,
    category: String,
    fire_at: i64,
    sent: bool,
    created_at: i64,
}

impl From<ReminderRaw> for Reminder {
    fn from(raw: ReminderRaw) -> Self {
        Self {
            id: raw.reminder_uid.into(),
            owner_id: raw.owner_uid.into(),
            title: raw.title,
            message: raw.message,
            category: ReminderCategory::from_str(&raw.category).unwrap_or_default(),
            fire_at: raw.fire_at,
            sent: raw.sent,
            created_at: raw.created_at,
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, owner_uid, title, message, category, fire_at, sent, created_at)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(reminder.owner_id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.message)
        .bind(reminder.category.to_string())
        .bind(reminder.fire_at)
        .bind(reminder.sent)
        .bind(reminder.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            UPDATE reminders
            SET title = $2, message = $3, category = $4, fire_at = $5, sent = $6
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder.id.inner_ref())
        .bind(&reminder.title)
        .bind(&reminder.message)
        .bind(reminder.category.to_string())
        .bind(reminder.fire_at)
        .bind(reminder.sent)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|reminder| reminder.into())
    }

    async fn find_upcoming_by_owner(&self, owner_id: &ID, after: i64) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.owner_uid = $1 AND r.fire_at >= $2 AND NOT r.sent
            ORDER BY r.fire_at ASC
            "#,
        )
        .bind(owner_id.inner_ref())
        .bind(after)
        .fetch_all(&self.pool)
        .await
        .unwrap_or_else(|err| {
            error!("Unable to query upcoming reminders: {:?}", err);
            Vec::new()
        })
        .into_iter()
        .map(|reminder| reminder.into())
        .collect()
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_default()
        .map(|reminder| reminder.into())
    }
}

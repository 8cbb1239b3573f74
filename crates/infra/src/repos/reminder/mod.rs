mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;

use helsa_notify_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Unsent reminders for the owner with `fire_at >= after`, ordered
    /// by `fire_at` ascending
    async fn find_upcoming_by_owner(&self, owner_id: &ID, after: i64) -> Vec<Reminder>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
}

#[cfg(test)]
mod tests {
    use crate::setup_context_inmemory;
    use helsa_notify_domain::{Entity, Reminder, ReminderCategory};

    fn reminder_factory(owner_id: &helsa_notify_domain::ID, fire_at: i64) -> Reminder {
        Reminder::new(
            owner_id.clone(),
            "Take iron supplement".into(),
            "With breakfast".into(),
            ReminderCategory::Medication,
            fire_at,
            0,
        )
    }

    #[tokio::test]
    async fn create_and_delete() {
        let ctx = setup_context_inmemory();
        let owner_id = Default::default();
        let reminder = reminder_factory(&owner_id, 100);

        assert!(ctx.repos.reminders.insert(&reminder).await.is_ok());

        let res = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert!(Entity::eq(&res, &reminder));

        let res = ctx.repos.reminders.delete(&reminder.id).await;
        assert!(res.is_some());
        assert!(ctx.repos.reminders.find(&reminder.id).await.is_none());
    }

    #[tokio::test]
    async fn upcoming_is_ordered_and_excludes_sent_and_past() {
        let ctx = setup_context_inmemory();
        let owner_id = Default::default();

        let past = reminder_factory(&owner_id, 50);
        let late = reminder_factory(&owner_id, 300);
        let early = reminder_factory(&owner_id, 200);
        let mut sent = reminder_factory(&owner_id, 400);
        sent.mark_sent();
        for reminder in [&past, &late, &early, &sent] {
            ctx.repos.reminders.insert(reminder).await.unwrap();
        }

        let upcoming = ctx
            .repos
            .reminders
            .find_upcoming_by_owner(&owner_id, 100)
            .await;
        assert_eq!(upcoming.len(), 2);
        assert!(Entity::eq(&upcoming[0], &early));
        assert!(Entity::eq(&upcoming[1], &late));
    }
}

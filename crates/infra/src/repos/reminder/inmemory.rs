use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use helsa_notify_domain::{Reminder, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_upcoming_by_owner(&self, owner_id: &ID, after: i64) -> Vec<Reminder> {
        let mut reminders = find_by(&self.reminders, |reminder: &Reminder| {
            reminder.owner_id == *owner_id && reminder.fire_at >= after && !reminder.sent
        });
        reminders.sort_by_key(|reminder| reminder.fire_at);
        reminders
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }
}

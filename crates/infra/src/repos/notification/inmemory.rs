use super::INotificationRepo;
use crate::repos::shared::{inmemory_repo::*, repo::DeleteResult};
use helsa_notify_domain::{Notification, ID};

pub struct InMemoryNotificationRepo {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl InMemoryNotificationRepo {
    pub fn new() -> Self {
        Self {
            notifications: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl INotificationRepo for InMemoryNotificationRepo {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()> {
        insert(notification, &self.notifications);
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

        let existing = find_by(&self.notifications, |n: &Notification| {
            n.reminder_ref.as_ref() == Some(&reminder_ref)
        })
        .into_iter()
        .next();

        let upserted = match existing {
            Some(existing) => {
                // Overwrite everything except the identity
                let mut updated = notification.clone();
                updated.id = existing.id;
                save(&updated, &self.notifications);
                updated
            }
            None => {
                insert(notification, &self.notifications);
                notification.clone()
            }
        };
        Ok(upserted)
    }

    async fn find(&self, notification_id: &ID) -> Option<Notification> {
        find(notification_id, &self.notifications)
    }

    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Notification> {
        let mut notifications = find_by(&self.notifications, |n: &Notification| {
            n.owner_id == *owner_id
        });
        notifications.sort_by_key(|n| std::cmp::Reverse(n.created_at));
        notifications
    }

    async fn mark_read(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification> {
        update_many(
            &self.notifications,
            |n: &Notification| n.id == *notification_id && n.owner_id == *owner_id,
            |n| n.is_read = true,
        );
        find(notification_id, &self.notifications).filter(|n| n.owner_id == *owner_id)
    }

    async fn mark_many_read(&self, owner_id: &ID, notification_ids: &[ID]) -> anyhow::Result<()> {
        update_many(
            &self.notifications,
            |n: &Notification| n.owner_id == *owner_id && notification_ids.contains(&n.id),
            |n| n.is_read = true,
        );
        Ok(())
    }

    async fn delete(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification> {
        let deleted = find_and_delete_by(&self.notifications, |n: &Notification| {
            n.id == *notification_id && n.owner_id == *owner_id
        });
        deleted.into_iter().next()
    }

    async fn delete_by_owner(&self, owner_id: &ID) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.notifications, |n: &Notification| {
            n.owner_id == *owner_id
        });
        Ok(res)
    }

    async fn delete_by_reminder(&self, reminder_ref: &ID) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.notifications, |n: &Notification| {
            n.reminder_ref.as_ref() == Some(reminder_ref)
        });
        Ok(res)
    }

    async fn delete_by_owner_and_titles(
        &self,
        owner_id: &ID,
        titles: &[&str],
    ) -> anyhow::Result<DeleteResult> {
        let res = delete_by(&self.notifications, |n: &Notification| {
            n.owner_id == *owner_id && titles.contains(&n.title.as_str())
        });
        Ok(res)
    }
}

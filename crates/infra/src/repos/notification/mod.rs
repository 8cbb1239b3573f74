mod inmemory;
mod postgres;

pub use inmemory::InMemoryNotificationRepo;
pub use postgres::PostgresNotificationRepo;

use crate::repos::shared::repo::DeleteResult;
use helsa_notify_domain::{Notification, ID};

#[async_trait::async_trait]
pub trait INotificationRepo: Send + Sync {
    async fn insert(&self, notification: &Notification) -> anyhow::Result<()>;
    /// Inserts the notification, or overwrites the existing one with
    /// the same `reminder_ref`. This is what keeps a rescheduled
    /// `Reminder` from leaving duplicate entries behind: the
    /// uniqueness on `reminder_ref` is enforced here at the store
    /// layer, not by caller discipline.
    ///
    /// Must only be called with a notification that carries a
    /// `reminder_ref`.
    async fn upsert_by_reminder(&self, notification: &Notification)
        -> anyhow::Result<Notification>;
    async fn find(&self, notification_id: &ID) -> Option<Notification>;
    /// All of the owner's notifications, newest first
    async fn find_by_owner(&self, owner_id: &ID) -> Vec<Notification>;
    async fn mark_read(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification>;
    async fn mark_many_read(&self, owner_id: &ID, notification_ids: &[ID]) -> anyhow::Result<()>;
    async fn delete(&self, notification_id: &ID, owner_id: &ID) -> Option<Notification>;
    async fn delete_by_owner(&self, owner_id: &ID) -> anyhow::Result<DeleteResult>;
    async fn delete_by_reminder(&self, reminder_ref: &ID) -> anyhow::Result<DeleteResult>;
    /// Deletes the owner's notifications whose title is one of
    /// `titles`. Used to purge cycle generated notifications by their
    /// naming convention.
    async fn delete_by_owner_and_titles(
        &self,
        owner_id: &ID,
        titles: &[&str],
    ) -> anyhow::Result<DeleteResult>;
}

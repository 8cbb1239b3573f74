use helsa_notify_domain::{Reminder, ReminderCategory, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderDTO {
    pub id: ID,
    pub title: String,
    pub message: String,
    pub category: ReminderCategory,
    pub fire_at: i64,
    pub sent: bool,
    pub created_at: i64,
}

impl ReminderDTO {
    pub fn new(reminder: Reminder) -> Self {
        Self {
            id: reminder.id,
            title: reminder.title,
            message: reminder.message,
            category: reminder.category,
            fire_at: reminder.fire_at,
            sent: reminder.sent,
            created_at: reminder.created_at,
        }
    }
}

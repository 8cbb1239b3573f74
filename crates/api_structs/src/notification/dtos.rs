use helsa_notify_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDTO {
    pub id: ID,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    pub audience_role: Option<String>,
    pub scheduled_at: Option<i64>,
    pub reminder_id: Option<ID>,
    pub created_at: i64,
}

impl NotificationDTO {
    pub fn new(notification: Notification) -> Self {
        Self {
            id: notification.id,
            title: notification.title,
            message: notification.message,
            is_read: notification.is_read,
            audience_role: notification.audience_role,
            scheduled_at: notification.scheduled_at,
            reminder_id: notification.reminder_ref,
            created_at: notification.created_at,
        }
    }
}

use helsa_notify_domain::{Notification, ID};
use serde::{Deserialize, Serialize};

use crate::dtos::NotificationDTO;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub notification: NotificationDTO,
}

impl NotificationResponse {
    pub fn new(notification: Notification) -> Self {
        Self {
            notification: NotificationDTO::new(notification),
        }
    }
}

pub mod list_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub notifications: Vec<NotificationDTO>,
        pub unread_count: usize,
    }

    impl APIResponse {
        pub fn new(notifications: Vec<Notification>, unread_count: usize) -> Self {
            Self {
                notifications: notifications
                    .into_iter()
                    .map(NotificationDTO::new)
                    .collect(),
                unread_count,
            }
        }
    }
}

pub mod mark_notification_read {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod mark_notifications_read {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub notification_ids: Vec<ID>,
    }

    pub use super::list_notifications::APIResponse;
}

pub mod delete_notification {
    use super::*;

    #[derive(Debug, Deserialize)]
    pub struct PathParams {
        pub notification_id: ID,
    }

    pub type APIResponse = NotificationResponse;
}

pub mod delete_all_notifications {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub deleted_count: i64,
    }
}

use crate::shared::entity::{Entity, ID};

/// A `Notification` is the durable, owner-visible trace of a push
/// notification, either pending (a future dispatch is registered,
/// `scheduled_at` set) or sent (`scheduled_at` cleared).
///
/// When `reminder_ref` is present there is at most one pending
/// `Notification` per referenced `Reminder`, the notification repos
/// enforce this with upsert-by-reminder semantics.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: ID,
    pub owner_id: ID,
    pub title: String,
    pub message: String,
    pub is_read: bool,
    /// Optional role of the intended audience, e.g. "admin".
    /// Notifications created by the scheduler leave this empty.
    pub audience_role: Option<String>,
    /// Timestamp in millis of the registered future dispatch.
    /// `None` once the notification has been sent
    pub scheduled_at: Option<i64>,
    /// Back-reference to the `Reminder` this notification was derived
    /// from. Cycle generated notifications carry no reference.
    pub reminder_ref: Option<ID>,
    pub created_at: i64,
}

impl Notification {
    /// A notification awaiting its dispatch at `scheduled_at`
    pub fn pending(
        owner_id: ID,
        title: String,
        message: String,
        reminder_ref: Option<ID>,
        scheduled_at: i64,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title,
            message,
            is_read: false,
            audience_role: None,
            scheduled_at: Some(scheduled_at),
            reminder_ref,
            created_at: now,
        }
    }

    /// A notification that has been dispatched
    pub fn sent(
        owner_id: ID,
        title: String,
        message: String,
        reminder_ref: Option<ID>,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title,
            message,
            is_read: false,
            audience_role: None,
            scheduled_at: None,
            reminder_ref,
            created_at: now,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.scheduled_at.is_some()
    }
}

impl Entity for Notification {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_and_sent_states() {
        let pending = Notification::pending(
            Default::default(),
            "title".into(),
            "message".into(),
            None,
            100,
            0,
        );
        assert!(pending.is_pending());
        assert!(!pending.is_read);

        let sent = Notification::sent(
            Default::default(),
            "title".into(),
            "message".into(),
            None,
            100,
        );
        assert!(!sent.is_pending());
    }
}

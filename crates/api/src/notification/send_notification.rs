use crate::shared::usecase::UseCase;
use helsa_notify_domain::{Notification, PushToken, ID};
use helsa_notify_infra::{HelsaContext, PushTransportError};

/// Delivers a notification to the owner's registered device and
/// writes the durable record of the delivery.
///
/// The record is written before the transport call, so the owner
/// visible trace and the actual delivery never diverge by more than a
/// poll tick. When the delivery is derived from a reminder, the record
/// write is an upsert keyed on the reminder so a retried job does not
/// leave duplicates behind.
#[derive(Debug)]
pub struct SendNotificationUseCase {
    pub owner_id: ID,
    pub title: String,
    pub message: String,
    pub reminder_ref: Option<ID>,
}

#[derive(Debug)]
pub enum UseCaseError {
    /// The owner has no registered push delivery token
    NoAddress,
    /// The stored token fails format validation
    InvalidAddress,
    /// The push transport provider rejected the delivery or could not
    /// be reached
    Transport(PushTransportError),
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl UseCase for SendNotificationUseCase {
    type Response = Notification;

    type Error = UseCaseError;

    const NAME: &'static str = "SendNotification";

    async fn execute(&mut self, ctx: &HelsaContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();

        let notification = Notification::sent(
            self.owner_id.clone(),
            self.title.clone(),
            self.message.clone(),
            self.reminder_ref.clone(),
            now,
        );
        let notification = match &self.reminder_ref {
            Some(_) => ctx
                .repos
                .notifications
                .upsert_by_reminder(&notification)
                .await
                .map_err(|_| UseCaseError::StorageError)?,
            None => {
                ctx.repos
                    .notifications
                    .insert(&notification)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                notification
            }
        };

        let user = ctx
            .repos
            .users
            .find(&self.owner_id)
            .await
            .ok_or(UseCaseError::NoAddress)?;
        let token = user.device_token.ok_or(UseCaseError::NoAddress)?;
        let token = token
            .parse::<PushToken>()
            .map_err(|_| UseCaseError::InvalidAddress)?;

        ctx.push_gateway
            .deliver(&token, &self.title, &self.message)
            .await
            .map_err(UseCaseError::Transport)?;

        if let Some(reminder_ref) = &self.reminder_ref {
            if let Some(mut reminder) = ctx.repos.reminders.find(reminder_ref).await {
                reminder.mark_sent();
                ctx.repos
                    .reminders
                    .save(&reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
            }
        }

        Ok(notification)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::usecase::execute;
    use helsa_notify_domain::{Reminder, ReminderCategory, User};
    use helsa_notify_infra::{setup_context_inmemory, InMemoryPushGateway};
    use std::sync::Arc;

    #[actix_web::main]
    #[test]
    async fn delivers_and_marks_reminder_sent() {
        let mut ctx = setup_context_inmemory();
        let push = Arc::new(InMemoryPushGateway::new());
        ctx.push_gateway = push.clone();

        let user = User::new(Default::default(), Some("fcm:device-token-1".into()));
        ctx.repos.users.insert(&user).await.unwrap();

        let reminder = Reminder::new(
            user.id.clone(),
            "Take iron supplement".into(),
            "".into(),
            ReminderCategory::Medication,
            100,
            0,
        );
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        let usecase = SendNotificationUseCase {
            owner_id: user.id.clone(),
            title: reminder.title.clone(),
            message: reminder.message.clone(),
            reminder_ref: Some(reminder.id.clone()),
        };
        let notification = execute(usecase, &ctx).await.unwrap();

        assert_eq!(push.sent_count(), 1);
        assert!(!notification.is_pending());

        let reminder = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert!(reminder.sent);
    }

    #[actix_web::main]
    #[test]
    async fn missing_or_malformed_token_is_not_deliverable() {
        let ctx = setup_context_inmemory();

        let no_token = User::new(Default::default(), None);
        ctx.repos.users.insert(&no_token).await.unwrap();
        let usecase = SendNotificationUseCase {
            owner_id: no_token.id.clone(),
            title: "title".into(),
            message: "".into(),
            reminder_ref: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::NoAddress)
        ));

        let bad_token = User::new(Default::default(), Some("has whitespace".into()));
        ctx.repos.users.insert(&bad_token).await.unwrap();
        let usecase = SendNotificationUseCase {
            owner_id: bad_token.id.clone(),
            title: "title".into(),
            message: "".into(),
            reminder_ref: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::InvalidAddress)
        ));
    }

    #[actix_web::main]
    #[test]
    async fn record_is_written_even_when_transport_fails() {
        let mut ctx = setup_context_inmemory();
        let push = Arc::new(InMemoryPushGateway::new());
        push.set_broken(true);
        ctx.push_gateway = push.clone();

        let user = User::new(Default::default(), Some("fcm:device-token-1".into()));
        ctx.repos.users.insert(&user).await.unwrap();

        let usecase = SendNotificationUseCase {
            owner_id: user.id.clone(),
            title: "Lab results ready".into(),
            message: "".into(),
            reminder_ref: None,
        };
        assert!(matches!(
            execute(usecase, &ctx).await,
            Err(UseCaseError::Transport(_))
        ));
        assert_eq!(push.sent_count(), 0);

        let records = ctx.repos.notifications.find_by_owner(&user.id).await;
        assert_eq!(records.len(), 1);
    }
}

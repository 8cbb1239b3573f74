use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

pub const REMINDER_TITLE_MAX_LEN: usize = 100;
pub const REMINDER_MESSAGE_MAX_LEN: usize = 500;

/// A `Reminder` is the owner's intent to be notified at `fire_at`.
/// `fire_at` is the single source of truth for scheduling, any pending
/// `ScheduledJob` is derived from it and recreated when it changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` that authored this `Reminder` and which should
    /// receive a push notification at `fire_at`
    pub owner_id: ID,
    pub title: String,
    pub message: String,
    pub category: ReminderCategory,
    /// Timestamp in millis at which the owner should be notified
    pub fire_at: i64,
    /// One-way flag, flips false -> true when the notification
    /// has been dispatched or the owner marks the reminder complete
    pub sent: bool,
    pub created_at: i64,
}

impl Reminder {
    pub fn new(
        owner_id: ID,
        title: String,
        message: String,
        category: ReminderCategory,
        fire_at: i64,
        now: i64,
    ) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            title,
            message,
            category,
            fire_at,
            sent: false,
            created_at: now,
        }
    }

    pub fn validate(&self) -> Result<(), InvalidReminderError> {
        if self.title.trim().is_empty() {
            return Err(InvalidReminderError::EmptyTitle);
        }
        if self.title.chars().count() > REMINDER_TITLE_MAX_LEN {
            return Err(InvalidReminderError::TitleTooLong(REMINDER_TITLE_MAX_LEN));
        }
        if self.message.chars().count() > REMINDER_MESSAGE_MAX_LEN {
            return Err(InvalidReminderError::MessageTooLong(
                REMINDER_MESSAGE_MAX_LEN,
            ));
        }
        Ok(())
    }

    /// `sent` is monotonic, there is no way to flip it back
    pub fn mark_sent(&mut self) {
        self.sent = true;
    }
}

impl Entity for Reminder {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidReminderError {
    #[error("Reminder title cannot be empty")]
    EmptyTitle,
    #[error("Reminder title cannot be longer than {0} characters")]
    TitleTooLong(usize),
    #[error("Reminder message cannot be longer than {0} characters")]
    MessageTooLong(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderCategory {
    Medication,
    Appointment,
    Lab,
    Checkup,
    Custom,
}

impl Default for ReminderCategory {
    fn default() -> Self {
        Self::Custom
    }
}

impl Display for ReminderCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let category = match self {
            Self::Medication => "medication",
            Self::Appointment => "appointment",
            Self::Lab => "lab",
            Self::Checkup => "checkup",
            Self::Custom => "custom",
        };
        write!(f, "{}", category)
    }
}

#[derive(Error, Debug)]
pub enum InvalidCategoryError {
    #[error("Reminder category: {0} is not known")]
    Unknown(String),
}

impl FromStr for ReminderCategory {
    type Err = InvalidCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medication" => Ok(Self::Medication),
            "appointment" => Ok(Self::Appointment),
            "lab" => Ok(Self::Lab),
            "checkup" => Ok(Self::Checkup),
            "custom" => Ok(Self::Custom),
            _ => Err(InvalidCategoryError::Unknown(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reminder_factory(title: &str, message: &str) -> Reminder {
        Reminder::new(
            Default::default(),
            title.to_string(),
            message.to_string(),
            ReminderCategory::Medication,
            100,
            0,
        )
    }

    #[test]
    fn validates_title_and_message_lengths() {
        assert!(reminder_factory("Take iron supplement", "").validate().is_ok());
        assert_eq!(
            reminder_factory("", "body").validate(),
            Err(InvalidReminderError::EmptyTitle)
        );
        assert_eq!(
            reminder_factory("  ", "body").validate(),
            Err(InvalidReminderError::EmptyTitle)
        );
        assert_eq!(
            reminder_factory(&"a".repeat(101), "body").validate(),
            Err(InvalidReminderError::TitleTooLong(100))
        );
        assert_eq!(
            reminder_factory("title", &"a".repeat(501)).validate(),
            Err(InvalidReminderError::MessageTooLong(500))
        );
        assert!(reminder_factory(&"a".repeat(100), &"a".repeat(500))
            .validate()
            .is_ok());
    }

    #[test]
    fn parses_categories() {
        assert_eq!(
            "medication".parse::<ReminderCategory>().unwrap(),
            ReminderCategory::Medication
        );
        assert_eq!(
            "custom".parse::<ReminderCategory>().unwrap(),
            ReminderCategory::Custom
        );
        assert!("surgery".parse::<ReminderCategory>().is_err());
    }

    #[test]
    fn sent_flag_is_monotonic() {
        let mut reminder = reminder_factory("title", "");
        assert!(!reminder.sent);
        reminder.mark_sent();
        reminder.mark_sent();
        assert!(reminder.sent);
    }
}

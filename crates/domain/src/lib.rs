mod cycle;
mod notification;
mod reminder;
mod scheduled_job;
mod shared;
mod user;

pub use cycle::{
    CyclePreferences, CycleProfile, InvalidCycleProfileError, CYCLE_STARTED_TITLE,
    CYCLE_UPCOMING_TITLE, MAX_CYCLE_LENGTH_DAYS, MAX_EVENT_DURATION_DAYS, MIN_CYCLE_LENGTH_DAYS,
    MIN_EVENT_DURATION_DAYS,
};
pub use notification::Notification;
pub use reminder::{
    InvalidReminderError, Reminder, ReminderCategory, REMINDER_MESSAGE_MAX_LEN,
    REMINDER_TITLE_MAX_LEN,
};
pub use scheduled_job::{JobKind, JobPayload, ScheduledJob, MAX_JOB_FAILURES};
pub use shared::entity::{Entity, ID};
pub use user::{InvalidPushTokenError, PushToken, User};

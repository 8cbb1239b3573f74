use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// Number of failed executions after which a `ScheduledJob` is
/// dropped instead of retried
pub const MAX_JOB_FAILURES: i64 = 3;

/// A `ScheduledJob` is a durable unit of deferred work. It is picked
/// up by the dispatcher poll loop once `due_at` has passed, deleted on
/// success and retried on the next tick on failure until the
/// failure cutoff is reached.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledJob {
    pub id: ID,
    /// Timestamp in millis at which this job becomes due
    pub due_at: i64,
    pub kind: JobKind,
    pub payload: JobPayload,
    /// Number of times execution of this job has failed
    pub fail_count: i64,
}

impl ScheduledJob {
    pub fn new(due_at: i64, payload: JobPayload) -> Self {
        Self {
            id: Default::default(),
            due_at,
            kind: JobKind::SendNotification,
            payload,
            fail_count: 0,
        }
    }

    pub fn register_failure(&mut self) {
        self.fail_count += 1;
    }

    /// A poisoned job has failed too many times and must be dropped
    /// rather than retried again
    pub fn is_poisoned(&self) -> bool {
        self.fail_count >= MAX_JOB_FAILURES
    }
}

impl Entity for ScheduledJob {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobPayload {
    pub owner_id: ID,
    pub title: String,
    pub message: String,
    /// Back-reference to the `Reminder` this job was derived from.
    /// Cycle generated jobs carry no reference.
    pub reminder_ref: Option<ID>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobKind {
    #[serde(rename = "send-notification")]
    SendNotification,
}

impl Display for JobKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SendNotification => write!(f, "send-notification"),
        }
    }
}

#[derive(Error, Debug)]
pub enum InvalidJobKindError {
    #[error("Job kind: {0} is not known")]
    Unknown(String),
}

impl FromStr for JobKind {
    type Err = InvalidJobKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "send-notification" => Ok(Self::SendNotification),
            _ => Err(InvalidJobKindError::Unknown(s.to_string())),
        }
    }
}

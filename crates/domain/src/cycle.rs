use crate::shared::entity::{Entity, ID};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Title of notifications announcing an upcoming cycle event.
/// `update_cycle_start` relies on this naming convention to purge
/// stale cycle notifications before regenerating them.
pub const CYCLE_UPCOMING_TITLE: &str = "Upcoming Period";
/// Title of the notification on the expected start date itself
pub const CYCLE_STARTED_TITLE: &str = "Period Started";

pub const MIN_CYCLE_LENGTH_DAYS: i64 = 15;
pub const MAX_CYCLE_LENGTH_DAYS: i64 = 90;
pub const MIN_EVENT_DURATION_DAYS: i64 = 1;
pub const MAX_EVENT_DURATION_DAYS: i64 = 14;

/// Per-owner biological cycle tracking state from which recurring
/// notifications are derived
#[derive(Debug, Clone, PartialEq)]
pub struct CycleProfile {
    pub id: ID,
    pub owner_id: ID,
    /// First recorded cycle start date
    pub anchor_date: NaiveDate,
    pub cycle_length_days: i64,
    pub event_duration_days: i64,
    /// Recorded start dates, append-only. Corrections append a new
    /// entry rather than mutate old ones.
    pub history: Vec<NaiveDate>,
    pub preferences: CyclePreferences,
    /// Derived: last history entry + `cycle_length_days`
    pub next_event_date: NaiveDate,
}

impl CycleProfile {
    pub fn new(
        owner_id: ID,
        start_date: NaiveDate,
        cycle_length_days: i64,
        event_duration_days: i64,
        preferences: CyclePreferences,
    ) -> Self {
        Self {
            id: Default::default(),
            owner_id,
            anchor_date: start_date,
            cycle_length_days,
            event_duration_days,
            history: vec![start_date],
            preferences,
            next_event_date: start_date + Duration::days(cycle_length_days),
        }
    }

    pub fn validate(&self) -> Result<(), InvalidCycleProfileError> {
        if self.cycle_length_days < MIN_CYCLE_LENGTH_DAYS
            || self.cycle_length_days > MAX_CYCLE_LENGTH_DAYS
        {
            return Err(InvalidCycleProfileError::CycleLength(
                self.cycle_length_days,
            ));
        }
        if self.event_duration_days < MIN_EVENT_DURATION_DAYS
            || self.event_duration_days > MAX_EVENT_DURATION_DAYS
        {
            return Err(InvalidCycleProfileError::EventDuration(
                self.event_duration_days,
            ));
        }
        Ok(())
    }

    /// Appends a recorded start date and recomputes the derived
    /// `next_event_date`
    pub fn record_start(&mut self, start_date: NaiveDate) {
        self.history.push(start_date);
        self.recompute_next_event();
    }

    fn recompute_next_event(&mut self) {
        let last = self.history.last().copied().unwrap_or(self.anchor_date);
        self.next_event_date = last + Duration::days(self.cycle_length_days);
    }
}

impl Entity for CycleProfile {
    fn id(&self) -> &ID {
        &self.id
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidCycleProfileError {
    #[error("Cycle length of {0} days is outside the supported range")]
    CycleLength(i64),
    #[error("Event duration of {0} days is outside the supported range")]
    EventDuration(i64),
}

/// Which lead-time notifications the owner has enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclePreferences {
    pub seven_days_before: bool,
    pub three_days_before: bool,
    pub one_day_before: bool,
    pub on_start_date: bool,
}

impl CyclePreferences {
    /// Enabled lead-times in days before the next event date,
    /// largest first. `0` means on the start date itself.
    pub fn enabled_offsets(&self) -> Vec<i64> {
        let toggles = [
            (self.seven_days_before, 7),
            (self.three_days_before, 3),
            (self.one_day_before, 1),
            (self.on_start_date, 0),
        ];
        toggles
            .iter()
            .filter(|(enabled, _)| *enabled)
            .map(|(_, offset)| *offset)
            .collect()
    }
}

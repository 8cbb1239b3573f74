use chrono::NaiveDate;
use helsa_notify_domain::{CyclePreferences, CycleProfile};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleProfileDTO {
    pub anchor_date: NaiveDate,
    pub cycle_length_days: i64,
    pub event_duration_days: i64,
    pub history: Vec<NaiveDate>,
    pub preferences: CyclePreferences,
    pub next_event_date: NaiveDate,
}

impl CycleProfileDTO {
    pub fn new(profile: CycleProfile) -> Self {
        Self {
            anchor_date: profile.anchor_date,
            cycle_length_days: profile.cycle_length_days,
            event_duration_days: profile.event_duration_days,
            history: profile.history,
            preferences: profile.preferences,
            next_event_date: profile.next_event_date,
        }
    }
}

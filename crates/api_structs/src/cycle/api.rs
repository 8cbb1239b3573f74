use chrono::NaiveDate;
use helsa_notify_domain::{CyclePreferences, CycleProfile};
use serde::{Deserialize, Serialize};

use crate::dtos::CycleProfileDTO;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleProfileResponse {
    pub profile: CycleProfileDTO,
    /// Number of cycle notifications registered by this submission
    pub scheduled_notifications: usize,
}

impl CycleProfileResponse {
    pub fn new(profile: CycleProfile, scheduled_notifications: usize) -> Self {
        Self {
            profile: CycleProfileDTO::new(profile),
            scheduled_notifications,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleStartBody {
    pub start_date: NaiveDate,
    pub cycle_length_days: i64,
    pub event_duration_days: i64,
    #[serde(default)]
    pub preferences: CyclePreferences,
}

pub mod record_cycle_start {
    use super::*;

    pub type RequestBody = CycleStartBody;
    pub type APIResponse = CycleProfileResponse;
}

pub mod update_cycle_start {
    use super::*;

    pub type RequestBody = CycleStartBody;
    pub type APIResponse = CycleProfileResponse;
}

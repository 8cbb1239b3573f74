mod record_cycle_start;
mod update_cycle_start;

use crate::notification::schedule_notification::ScheduleNotificationUseCase;
use crate::shared::usecase::execute;
use actix_web::web;
use chrono::{DateTime, Duration, Utc};
use helsa_notify_domain::{CycleProfile, CYCLE_STARTED_TITLE, CYCLE_UPCOMING_TITLE};
use helsa_notify_infra::HelsaContext;
use record_cycle_start::record_cycle_start_controller;
use update_cycle_start::update_cycle_start_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/cycle", web::post().to(record_cycle_start_controller));
    cfg.route("/cycle", web::put().to(update_cycle_start_controller));
}

/// Hour of day (UTC) at which cycle notifications are delivered
const CYCLE_NOTIFY_HOUR: u32 = 9;

/// Registers one notification per enabled lead-time offset of the
/// profile. Offsets whose delivery day has already passed relative to
/// the next event are skipped, the rest are submitted independently so
/// a failure registering one does not block the others.
///
/// Returns the number of offsets that were registered.
async fn register_cycle_notifications(profile: &CycleProfile, ctx: &HelsaContext) -> usize {
    let now = ctx.sys.get_timestamp_millis();
    let today = match DateTime::<Utc>::from_timestamp_millis(now) {
        Some(now) => now.date_naive(),
        None => return 0,
    };
    let days_until_next_event = (profile.next_event_date - today).num_days();

    let mut scheduled = 0;
    for offset in profile.preferences.enabled_offsets() {
        if offset > days_until_next_event {
            continue;
        }
        let notify_date = profile.next_event_date - Duration::days(offset);
        let deliver_at = match notify_date.and_hms_opt(CYCLE_NOTIFY_HOUR, 0, 0) {
            Some(notify_at) => notify_at.and_utc().timestamp_millis(),
            None => continue,
        };

        let (title, message) = if offset == 0 {
            (
                CYCLE_STARTED_TITLE,
                "Your period is expected to start today".to_string(),
            )
        } else {
            (
                CYCLE_UPCOMING_TITLE,
                format!("Your period is expected to start in {} days", offset),
            )
        };

        let usecase = ScheduleNotificationUseCase {
            owner_id: profile.owner_id.clone(),
            title: title.to_string(),
            message,
            deliver_at,
            reminder_ref: None,
        };
        if execute(usecase, ctx).await.is_ok() {
            scheduled += 1;
        }
    }

    scheduled
}

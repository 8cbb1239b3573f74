mod delete_all_notifications;
mod delete_notification;
mod list_notifications;
mod mark_notification_read;
mod mark_notifications_read;

pub mod execute_due_jobs;
pub mod schedule_notification;
pub mod send_notification;

use actix_web::web;
use delete_all_notifications::delete_all_notifications_controller;
use delete_notification::delete_notification_controller;
use list_notifications::list_notifications_controller;
use mark_notification_read::mark_notification_read_controller;
use mark_notifications_read::mark_notifications_read_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/notifications", web::get().to(list_notifications_controller));
    cfg.route(
        "/notifications",
        web::delete().to(delete_all_notifications_controller),
    );
    cfg.route(
        "/notifications/read",
        web::put().to(mark_notifications_read_controller),
    );
    cfg.route(
        "/notifications/{notification_id}/read",
        web::put().to(mark_notification_read_controller),
    );
    cfg.route(
        "/notifications/{notification_id}",
        web::delete().to(delete_notification_controller),
    );
}

pub mod check_upcoming_deadlines;

use actix_web::web;
use check_upcoming_deadlines::run_deadline_check_controller;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route(
        "/reminders/check",
        web::post().to(run_deadline_check_controller),
    );
}

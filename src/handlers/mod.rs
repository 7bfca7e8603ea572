pub mod auth_handler;
pub mod health_handler;
pub mod quiz_handler;

pub use auth_handler::{callback, dashboard, login, logout};
pub use health_handler::health_check;
pub use quiz_handler::create_test;

use actix_web::web;

/// Registers every route of the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(login)
        .service(callback)
        .service(dashboard)
        .service(logout)
        .service(create_test);
}

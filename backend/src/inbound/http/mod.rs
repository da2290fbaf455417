//! HTTP inbound adapter exposing the REST endpoints.

pub mod error;
pub mod health;
pub mod json_body;
pub mod response;
pub mod state;
pub mod todos;
pub(crate) mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register the banner, health and todo endpoints.
///
/// Handlers expect a `web::Data<state::HttpState>` on the application.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::hello)
        .service(health::health)
        .service(todos::create_todo)
        .service(todos::list_todos)
        .service(todos::get_todo)
        .service(todos::update_todo)
        .service(todos::delete_todo);
}

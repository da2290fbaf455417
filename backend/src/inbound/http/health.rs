//! Service banner and store health endpoints.

use std::collections::BTreeMap;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, get, web};
use serde_json::json;

use crate::domain::ports::is_down;
use crate::inbound::http::response::json_response;
use crate::inbound::http::state::HttpState;

/// Greeting served at the root path.
pub const GREETING: &str = "Hello World from Todo Backend!";

/// Root banner.
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting")),
    tags = ["health"],
    operation_id = "hello"
)]
#[get("/")]
pub async fn hello() -> HttpResponse {
    json_response(StatusCode::OK, &json!({ "message": GREETING }))
}

/// Store health report.
///
/// Returns 503 when the store reports itself down; the body is the report
/// either way.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Store reachable", body = BTreeMap<String, String>),
        (status = 503, description = "Store unreachable", body = BTreeMap<String, String>)
    ),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    let report = state.health.health().await;
    let status = if is_down(&report) {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    };
    json_response(status, &report)
}

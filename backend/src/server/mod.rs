//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use todo_backend::Trace;
#[cfg(debug_assertions)]
use todo_backend::doc::ApiDoc;
use todo_backend::inbound::http;
use todo_backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Seconds in-flight requests get to finish once a stop signal arrives.
const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(Trace)
        .configure(http::configure);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    );
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener. Actix stops it on
/// SIGINT or SIGTERM, waiting up to five seconds for in-flight requests.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: &ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(config.db_pool.as_ref()));

    let server = HttpServer::new(move || build_app(http_state.clone()))
        .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
        .bind(config.bind_addr())?
        .run();

    Ok(server)
}

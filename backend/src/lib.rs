//! Todo backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds entities, ports and
//! the todo service; `inbound` adapts HTTP onto the driving ports; `outbound`
//! implements the repository and health ports over PostgreSQL or memory.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;

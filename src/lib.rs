//! CRM backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds the entities,
//! services, and ports; `inbound` exposes the REST API; `outbound`
//! provides the persistence and password hashing adapters; `server`
//! assembles everything into a running Actix application.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::trace::Trace;

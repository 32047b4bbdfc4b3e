//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::{
    ActivityService, AuthService, ContactService, DealService, LeadService, TokenService,
};
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    InMemoryActivityRepository, InMemoryContactRepository, InMemoryDealRepository,
    InMemoryIdentityRepository, InMemoryLeadRepository,
};
use crate::outbound::security::BcryptPasswordHasher;

/// Wire the domain services over the in-memory adapters.
fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let tokens = TokenService::new(&config.signing_key, config.token_ttl)
        .map_err(|e| std::io::Error::other(format!("token service setup failed: {e}")))?;

    let identities = Arc::new(InMemoryIdentityRepository::default());
    let contacts = Arc::new(InMemoryContactRepository::default());
    let deals = Arc::new(InMemoryDealRepository::default());
    let activities = Arc::new(InMemoryActivityRepository::default());

    Ok(HttpState {
        auth: AuthService::new(identities, Arc::new(BcryptPasswordHasher::new())),
        tokens: Arc::new(tokens),
        leads: LeadService::new(Arc::new(InMemoryLeadRepository::default())),
        contacts: ContactService::new(contacts.clone()),
        deals: DealService::new(deals.clone(), contacts.clone()),
        activities: ActivityService::new(activities, contacts, deals),
    })
}

/// Construct an Actix HTTP server from the provided configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when state construction or binding the
/// socket fails.
pub fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(build_http_state(&config)?);

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .wrap(Trace)
            .configure(configure_api);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        #[cfg(not(debug_assertions))]
        let app = app;

        app
    })
    .bind(config.bind_addr)?
    .run();

    Ok(server)
}

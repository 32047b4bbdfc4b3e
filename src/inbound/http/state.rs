//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on domain services and stay testable without real infrastructure.

use std::sync::Arc;

use crate::domain::{
    ActivityService, AuthService, ContactService, DealService, LeadService, TokenService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: AuthService,
    pub tokens: Arc<TokenService>,
    pub leads: LeadService,
    pub contacts: ContactService,
    pub deals: DealService,
    pub activities: ActivityService,
}

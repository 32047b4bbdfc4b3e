//! Domain layer: entities, use-case services, and the port boundary.
//!
//! Everything in here is transport-agnostic. The HTTP adapter under
//! `inbound` drives these services; the adapters under `outbound` implement
//! the ports.

mod access;
mod activity;
mod activity_service;
mod auth;
mod auth_service;
mod contact;
mod contact_service;
mod deal;
mod deal_service;
mod error;
mod identity;
mod lead;
mod lead_service;
pub mod ports;
mod token;

pub use access::{Operation, authorize, required_roles};
pub use activity::{Activity, ActivityDraft, ActivityKind, ActivityPatch, UnknownKind};
pub use activity_service::ActivityService;
pub use auth::{LoginCredentials, LoginValidationError, SessionClaims};
pub use auth_service::{AuthService, Registration};
pub use contact::{Contact, ContactDraft};
pub use contact_service::ContactService;
pub use deal::{Deal, DealDraft, DealPatch, DealStage, UnknownStage};
pub use deal_service::DealService;
pub use error::{Error, ErrorCode};
pub use identity::{Identity, Role, UnknownRole};
pub use lead::{Lead, LeadDraft, LeadPatch};
pub use lead_service::LeadService;
pub use token::{TokenConfigError, TokenService};

/// Result alias used by HTTP handlers and services alike.
pub type ApiResult<T> = Result<T, Error>;

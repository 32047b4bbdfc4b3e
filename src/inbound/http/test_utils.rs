//! Shared fixtures for HTTP handler tests.

use std::sync::Arc;

use chrono::Duration;

use crate::domain::{
    ActivityService, AuthService, ContactService, DealService, Identity, LeadService,
    Registration, Role, TokenService,
};
use crate::inbound::http::state::HttpState;
use crate::outbound::persistence::{
    InMemoryActivityRepository, InMemoryContactRepository, InMemoryDealRepository,
    InMemoryIdentityRepository, InMemoryLeadRepository,
};
use crate::outbound::security::BcryptPasswordHasher;

const TEST_SIGNING_KEY: &[u8] = b"test-signing-key-of-32-bytes!!!!";
/// Minimum bcrypt cost keeps registration-heavy tests fast.
const TEST_BCRYPT_COST: u32 = 4;

/// Assemble a fully wired state over empty in-memory stores.
pub fn test_state() -> HttpState {
    let identities = Arc::new(InMemoryIdentityRepository::default());
    let contacts = Arc::new(InMemoryContactRepository::default());
    let deals = Arc::new(InMemoryDealRepository::default());
    let activities = Arc::new(InMemoryActivityRepository::default());
    let hasher = Arc::new(BcryptPasswordHasher::with_cost(TEST_BCRYPT_COST));
    let tokens = Arc::new(
        TokenService::new(TEST_SIGNING_KEY, Duration::hours(1)).expect("valid signing key"),
    );

    HttpState {
        auth: AuthService::new(identities, hasher),
        tokens,
        leads: LeadService::new(Arc::new(InMemoryLeadRepository::default())),
        contacts: ContactService::new(contacts.clone()),
        deals: DealService::new(deals.clone(), contacts.clone()),
        activities: ActivityService::new(activities, contacts, deals),
    }
}

/// Register an identity with the given role and issue it a token.
pub async fn register_caller(state: &HttpState, email: &str, role: Role) -> (Identity, String) {
    let identity = state
        .auth
        .register(Registration {
            first_name: "Test".into(),
            last_name: "Caller".into(),
            email: email.into(),
            password: "password".into(),
            role: Some(role),
        })
        .await
        .expect("registration succeeds");
    let token = state.tokens.issue(email).expect("token issues");
    (identity, token)
}

/// Authorization header tuple for a bearer token.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

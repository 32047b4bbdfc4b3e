//! End-to-end scenarios over the assembled REST API.
//!
//! These tests drive real Actix handlers through the full stack: bearer
//! authentication, role checks, domain services, and the in-memory
//! adapters. Only the listening socket is left out.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use chrono::Duration;
use serde_json::{Value, json};
use uuid::Uuid;

use crm_backend::domain::{
    ActivityService, AuthService, ContactService, DealService, LeadService, TokenService,
};
use crm_backend::inbound::http::configure_api;
use crm_backend::inbound::http::state::HttpState;
use crm_backend::outbound::persistence::{
    InMemoryActivityRepository, InMemoryContactRepository, InMemoryDealRepository,
    InMemoryIdentityRepository, InMemoryLeadRepository,
};
use crm_backend::outbound::security::BcryptPasswordHasher;

const SIGNING_KEY: &[u8] = b"integration-signing-key-32-bytes";
/// Minimum bcrypt cost keeps the registration steps fast.
const BCRYPT_COST: u32 = 4;

fn assembled_state() -> HttpState {
    let identities = Arc::new(InMemoryIdentityRepository::default());
    let contacts = Arc::new(InMemoryContactRepository::default());
    let deals = Arc::new(InMemoryDealRepository::default());
    let activities = Arc::new(InMemoryActivityRepository::default());
    let tokens =
        Arc::new(TokenService::new(SIGNING_KEY, Duration::hours(1)).expect("valid signing key"));

    HttpState {
        auth: AuthService::new(identities, Arc::new(BcryptPasswordHasher::with_cost(BCRYPT_COST))),
        tokens,
        leads: LeadService::new(Arc::new(InMemoryLeadRepository::default())),
        contacts: ContactService::new(contacts.clone()),
        deals: DealService::new(deals.clone(), contacts.clone()),
        activities: ActivityService::new(activities, contacts, deals),
    }
}

/// Register an account over the API and log it in, returning the token.
async fn sign_up_and_login<S>(app: &S, email: &str, role: &str) -> String
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(json!({
                "firstName": "Casey",
                "lastName": "Rivers",
                "email": email,
                "password": "s3cret-enough",
                "role": role,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": email, "password": "s3cret-enough" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    body["token"]
        .as_str()
        .expect("login response carries a token")
        .to_owned()
}

fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}

#[actix_web::test]
async fn deal_lifecycle_with_role_gates() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(assembled_state()))
            .configure(configure_api),
    )
    .await;

    let manager = sign_up_and_login(&app, "manager@example.com", "MANAGER").await;
    let user = sign_up_and_login(&app, "user@example.com", "USER").await;
    let admin = sign_up_and_login(&app, "admin@example.com", "ADMIN").await;

    // A deal needs an existing contact.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/contacts")
            .insert_header(bearer(&manager))
            .set_json(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let contact: Value = test::read_body_json(res).await;
    let contact_id = contact["id"].as_str().expect("contact id").to_owned();

    // Probability defaults from the stage when the request omits it.
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/api/deals")
            .insert_header(bearer(&manager))
            .set_json(json!({
                "name": "Pilot rollout",
                "stage": "PROSPECTING",
                "value": "12500.00",
                "contactId": contact_id,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let deal: Value = test::read_body_json(res).await;
    assert_eq!(deal["name"], json!("Pilot rollout"));
    assert_eq!(deal["probability"], json!(10));
    assert_eq!(deal["createdAt"], deal["updatedAt"]);
    let deal_id = deal["id"].as_str().expect("deal id").to_owned();

    // Deal deletion is reserved for administrators.
    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/deals/{deal_id}"))
            .insert_header(bearer(&user))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/deals/{deal_id}"))
            .insert_header(bearer(&manager))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/deals/{deal_id}"))
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/deals/{}", Uuid::new_v4()))
            .insert_header(bearer(&admin))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn anonymous_and_tampered_callers_are_rejected() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(assembled_state()))
            .configure(configure_api),
    )
    .await;

    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/contacts").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/contacts")
            .insert_header(bearer("not-a-real-token"))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], json!("invalid token"));
}

#[actix_web::test]
async fn lead_endpoints_are_hidden_from_regular_users() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(assembled_state()))
            .configure(configure_api),
    )
    .await;

    let user = sign_up_and_login(&app, "user@example.com", "USER").await;
    let manager = sign_up_and_login(&app, "manager@example.com", "MANAGER").await;

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/leads")
            .insert_header(bearer(&user))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/api/leads")
            .insert_header(bearer(&manager))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}

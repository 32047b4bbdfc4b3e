//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/login    {"email":"a@x.com","password":"secret"}
//! POST /api/auth/register {"firstName":"Ada","lastName":"Lovelace",...}
//! GET  /api/auth/me
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::domain::{
    Error, Identity, LoginCredentials, LoginValidationError, Registration, Role,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login payload: the bearer token plus caller identification.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Registration request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Defaults to `USER` when absent.
    pub role: Option<String>,
}

/// Identity payload returned on registration. Never carries the hash.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentityResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Identity> for IdentityResponse {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            first_name: identity.first_name,
            last_name: identity.last_name,
            email: identity.email,
            role: identity.role,
            enabled: identity.enabled,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

/// Caller payload for `GET /api/auth/me`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CallerResponse {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Authenticate credentials and issue a session token.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.email, &payload.password)
        .map_err(map_login_validation_error)?;
    let identity = state.auth.login(credentials).await?;
    let token = state.tokens.issue(&identity.email)?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        id: identity.id,
        email: identity.email,
        role: identity.role,
    }))
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Register a new identity.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Identity created", body = IdentityResponse),
        (status = 400, description = "Duplicate email or invalid request", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let role = payload
        .role
        .map(|raw| {
            raw.parse::<Role>()
                .map_err(|err| Error::invalid_request(err.to_string()))
        })
        .transpose()?;
    let identity = state
        .auth
        .register(Registration {
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            password: payload.password,
            role,
        })
        .await?;
    Ok(HttpResponse::Ok().json(IdentityResponse::from(identity)))
}

/// Identify the caller behind the presented token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Caller identity", body = CallerResponse),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentIdentity",
    security(("bearer_auth" = []))
)]
#[get("/auth/me")]
pub async fn current_identity(caller: AuthenticatedCaller) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(CallerResponse {
        id: caller.id,
        email: caller.email,
        role: caller.role,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{bearer, register_caller, test_state};
    use crate::inbound::http::configure_api;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};

    fn register_body(email: &str) -> serde_json::Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": email,
            "password": "secret",
        })
    }

    #[actix_web::test]
    async fn register_then_login_round_trip() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_api),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(register_body("ada@example.com"))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let created: IdentityResponse = test::read_body_json(res).await;
        assert_eq!(created.role, Role::User);
        assert!(created.enabled);

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "email": "ada@example.com", "password": "secret" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        // Named to avoid shadowing the `login` route registration above.
        let login_body: LoginResponse = test::read_body_json(res).await;
        assert_eq!(login_body.email, "ada@example.com");
        assert_eq!(login_body.id, created.id);
        assert!(!login_body.token.is_empty());

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/auth/me")
                .insert_header(bearer(&login_body.token))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let me: CallerResponse = test::read_body_json(res).await;
        assert_eq!(me.email, "ada@example.com");
    }

    #[actix_web::test]
    async fn duplicate_registration_is_a_bad_request() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_api),
        )
        .await;

        for expected in [StatusCode::OK, StatusCode::BAD_REQUEST] {
            let res = test::call_service(
                &app,
                test::TestRequest::post()
                    .uri("/api/auth/register")
                    .set_json(register_body("ada@example.com"))
                    .to_request(),
            )
            .await;
            assert_eq!(res.status(), expected);
        }
    }

    #[actix_web::test]
    async fn unknown_role_is_a_bad_request() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_api),
        )
        .await;

        let mut body = register_body("ada@example.com");
        body["role"] = json!("SUPERUSER");
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/register")
                .set_json(body)
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.code, ErrorCode::InvalidRequest);
    }

    #[actix_web::test]
    async fn wrong_password_is_an_opaque_unauthorized() {
        let state = test_state();
        register_caller(&state, "ada@example.com", Role::User).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_api),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/auth/login")
                .set_json(json!({ "email": "ada@example.com", "password": "wrong" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.message, "invalid credentials");
    }

    #[actix_web::test]
    async fn me_without_a_token_is_unauthorized() {
        let state = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_api),
        )
        .await;

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/api/auth/me").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}

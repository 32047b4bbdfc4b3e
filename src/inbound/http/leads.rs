//! Lead API handlers. The whole surface is gated to ADMIN and MANAGER.
//!
//! ```text
//! GET    /api/leads
//! GET    /api/leads/email/{email}
//! GET    /api/leads/{id}
//! POST   /api/leads
//! PUT    /api/leads/{id}
//! PATCH  /api/leads/{id}/status
//! DELETE /api/leads/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Error, Lead, LeadDraft, LeadPatch, Operation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

/// Lead payload returned by every lead endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Lead> for LeadResponse {
    fn from(lead: Lead) -> Self {
        Self {
            id: lead.id,
            first_name: lead.first_name,
            last_name: lead.last_name,
            email: lead.email,
            phone: lead.phone,
            company: lead.company,
            status: lead.status,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        }
    }
}

/// Creation request body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLeadRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
}

impl From<CreateLeadRequest> for LeadDraft {
    fn from(request: CreateLeadRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            company: request.company,
            status: request.status,
        }
    }
}

/// Partial update body: absent fields leave stored values unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeadRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub status: Option<String>,
}

impl From<UpdateLeadRequest> for LeadPatch {
    fn from(request: UpdateLeadRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            company: request.company,
            status: request.status,
        }
    }
}

/// Status patch body.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct UpdateLeadStatusRequest {
    pub status: String,
}

#[utoipa::path(
    get,
    path = "/api/leads",
    responses(
        (status = 200, description = "All leads", body = [LeadResponse]),
        (status = 401, description = "Unauthenticated", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["leads"],
    operation_id = "listLeads",
    security(("bearer_auth" = []))
)]
#[get("/leads")]
pub async fn list_leads(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListLeads)?;
    let leads = state.leads.list().await?;
    Ok(HttpResponse::Ok().json(leads.into_iter().map(LeadResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/api/leads/email/{email}",
    params(("email" = String, Path, description = "Lead email")),
    responses(
        (status = 200, description = "Lead", body = LeadResponse),
        (status = 404, description = "No lead with this email", body = Error)
    ),
    tags = ["leads"],
    operation_id = "getLeadByEmail",
    security(("bearer_auth" = []))
)]
#[get("/leads/email/{email}")]
pub async fn get_lead_by_email(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::GetLead)?;
    let lead = state.leads.get_by_email(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeadResponse::from(lead)))
}

#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead", body = LeadResponse),
        (status = 404, description = "No such lead", body = Error)
    ),
    tags = ["leads"],
    operation_id = "getLead",
    security(("bearer_auth" = []))
)]
#[get("/leads/{id}")]
pub async fn get_lead(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::GetLead)?;
    let lead = state.leads.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(LeadResponse::from(lead)))
}

#[utoipa::path(
    post,
    path = "/api/leads",
    request_body = CreateLeadRequest,
    responses(
        (status = 201, description = "Lead created", body = LeadResponse),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["leads"],
    operation_id = "createLead",
    security(("bearer_auth" = []))
)]
#[post("/leads")]
pub async fn create_lead(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    payload: web::Json<CreateLeadRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::CreateLead)?;
    let lead = state.leads.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(LeadResponse::from(lead)))
}

#[utoipa::path(
    put,
    path = "/api/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead id")),
    request_body = UpdateLeadRequest,
    responses(
        (status = 200, description = "Lead updated", body = LeadResponse),
        (status = 404, description = "No such lead", body = Error)
    ),
    tags = ["leads"],
    operation_id = "updateLead",
    security(("bearer_auth" = []))
)]
#[put("/leads/{id}")]
pub async fn update_lead(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateLeadRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::UpdateLead)?;
    let lead = state
        .leads
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(LeadResponse::from(lead)))
}

#[utoipa::path(
    patch,
    path = "/api/leads/{id}/status",
    params(("id" = Uuid, Path, description = "Lead id")),
    request_body = UpdateLeadStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = LeadResponse),
        (status = 404, description = "No such lead", body = Error)
    ),
    tags = ["leads"],
    operation_id = "updateLeadStatus",
    security(("bearer_auth" = []))
)]
#[patch("/leads/{id}/status")]
pub async fn update_lead_status(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateLeadStatusRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::UpdateLead)?;
    let lead = state
        .leads
        .update_status(path.into_inner(), payload.into_inner().status)
        .await?;
    Ok(HttpResponse::Ok().json(LeadResponse::from(lead)))
}

#[utoipa::path(
    delete,
    path = "/api/leads/{id}",
    params(("id" = Uuid, Path, description = "Lead id")),
    responses(
        (status = 200, description = "Lead deleted"),
        (status = 404, description = "No such lead", body = Error)
    ),
    tags = ["leads"],
    operation_id = "deleteLead",
    security(("bearer_auth" = []))
)]
#[delete("/leads/{id}")]
pub async fn delete_lead(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::DeleteLead)?;
    state.leads.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::inbound::http::configure_api;
    use crate::inbound::http::test_utils::{bearer, register_caller, test_state};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    async fn app_with_tokens() -> (
        impl actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
        String,
        String,
    ) {
        let state = test_state();
        let (_, manager) = register_caller(&state, "manager@example.com", Role::Manager).await;
        let (_, user) = register_caller(&state, "user@example.com", Role::User).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_api),
        )
        .await;
        (app, manager, user)
    }

    fn create_body() -> serde_json::Value {
        json!({
            "firstName": "Ada",
            "lastName": "Lovelace",
            "email": "ada@example.com",
            "status": "NEW",
        })
    }

    #[actix_web::test]
    async fn plain_users_are_forbidden() {
        let (app, _manager, user) = app_with_tokens().await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/leads")
                .insert_header(bearer(&user))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn missing_token_is_unauthorized_not_forbidden() {
        let (app, _manager, _user) = app_with_tokens().await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/api/leads").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn manager_crud_round_trip() {
        let (app, manager, _user) = app_with_tokens().await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/leads")
                .insert_header(bearer(&manager))
                .set_json(create_body())
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: LeadResponse = test::read_body_json(res).await;
        assert_eq!(created.created_at, created.updated_at);

        // Merge update: only the phone changes.
        let res = test::call_service(
            &app,
            test::TestRequest::put()
                .uri(&format!("/api/leads/{}", created.id))
                .insert_header(bearer(&manager))
                .set_json(json!({ "phone": "+44 20 0000 0000" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let updated: LeadResponse = test::read_body_json(res).await;
        assert_eq!(updated.first_name, "Ada");
        assert_eq!(updated.phone.as_deref(), Some("+44 20 0000 0000"));

        let res = test::call_service(
            &app,
            test::TestRequest::patch()
                .uri(&format!("/api/leads/{}/status", created.id))
                .insert_header(bearer(&manager))
                .set_json(json!({ "status": "QUALIFIED" }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let patched: LeadResponse = test::read_body_json(res).await;
        assert_eq!(patched.status.as_deref(), Some("QUALIFIED"));

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/leads/email/ada@example.com")
                .insert_header(bearer(&manager))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = test::call_service(
            &app,
            test::TestRequest::delete()
                .uri(&format!("/api/leads/{}", created.id))
                .insert_header(bearer(&manager))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/api/leads/{}", created.id))
                .insert_header(bearer(&manager))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn listing_an_empty_store_returns_an_empty_array() {
        let (app, manager, _user) = app_with_tokens().await;
        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/api/leads")
                .insert_header(bearer(&manager))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<LeadResponse> = test::read_body_json(res).await;
        assert!(body.is_empty());
    }
}

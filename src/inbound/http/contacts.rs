//! Contact API handlers, open to any authenticated caller.
//!
//! Contact update is full replacement: the request body carries every
//! mutable field, and absent optionals clear the stored values.
//!
//! ```text
//! GET    /api/contacts
//! GET    /api/contacts/{id}
//! POST   /api/contacts
//! PUT    /api/contacts/{id}
//! DELETE /api/contacts/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Contact, ContactDraft, Error, Operation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

/// Contact payload returned by every contact endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            company: contact.company,
            job_title: contact.job_title,
            notes: contact.notes,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        }
    }
}

/// Body for both create and update; update replaces all fields.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub job_title: Option<String>,
    pub notes: Option<String>,
}

impl From<ContactRequest> for ContactDraft {
    fn from(request: ContactRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            company: request.company,
            job_title: request.job_title,
            notes: request.notes,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/contacts",
    responses(
        (status = 200, description = "All contacts", body = [ContactResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "listContacts",
    security(("bearer_auth" = []))
)]
#[get("/contacts")]
pub async fn list_contacts(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListContacts)?;
    let contacts = state.contacts.list().await?;
    Ok(HttpResponse::Ok().json(
        contacts
            .into_iter()
            .map(ContactResponse::from)
            .collect::<Vec<_>>(),
    ))
}

#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    params(("id" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact", body = ContactResponse),
        (status = 404, description = "No such contact", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "getContact",
    security(("bearer_auth" = []))
)]
#[get("/contacts/{id}")]
pub async fn get_contact(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::GetContact)?;
    let contact = state.contacts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Contact created", body = ContactResponse),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "createContact",
    security(("bearer_auth" = []))
)]
#[post("/contacts")]
pub async fn create_contact(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::CreateContact)?;
    let contact = state.contacts.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(ContactResponse::from(contact)))
}

#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    params(("id" = Uuid, Path, description = "Contact id")),
    request_body = ContactRequest,
    responses(
        (status = 200, description = "Contact replaced", body = ContactResponse),
        (status = 404, description = "No such contact", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "updateContact",
    security(("bearer_auth" = []))
)]
#[put("/contacts/{id}")]
pub async fn update_contact(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::UpdateContact)?;
    let contact = state
        .contacts
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(ContactResponse::from(contact)))
}

#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    params(("id" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Contact deleted"),
        (status = 404, description = "No such contact", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact",
    security(("bearer_auth" = []))
)]
#[delete("/contacts/{id}")]
pub async fn delete_contact(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::DeleteContact)?;
    state.contacts.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

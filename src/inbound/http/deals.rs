//! Deal API handlers.
//!
//! Reads are open to any authenticated caller; create and update need
//! ADMIN or MANAGER, and delete is ADMIN only.
//!
//! ```text
//! GET    /api/deals
//! GET    /api/deals/contact/{contactId}
//! GET    /api/deals/stage/{stage}
//! GET    /api/deals/stats/pipeline-value
//! GET    /api/deals/closing-soon
//! GET    /api/deals/high-probability
//! GET    /api/deals/{id}
//! POST   /api/deals
//! PUT    /api/deals/{id}
//! DELETE /api/deals/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Deal, DealDraft, DealPatch, DealStage, Error, Operation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

/// Deal payload returned by every deal endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DealResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub stage: DealStage,
    pub probability: u8,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Deal> for DealResponse {
    fn from(deal: Deal) -> Self {
        Self {
            id: deal.id,
            name: deal.name,
            description: deal.description,
            value: deal.value,
            stage: deal.stage,
            probability: deal.probability,
            close_date: deal.close_date,
            contact_id: deal.contact_id,
            created_at: deal.created_at,
            updated_at: deal.updated_at,
        }
    }
}

/// Creation request body. `contactId` is mandatory.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDealRequest {
    pub name: String,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub stage: DealStage,
    pub probability: Option<u8>,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Option<Uuid>,
}

/// Partial update body: absent fields leave stored values unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDealRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub value: Option<Decimal>,
    pub stage: Option<DealStage>,
    pub probability: Option<u8>,
    pub close_date: Option<NaiveDate>,
    pub contact_id: Option<Uuid>,
}

impl From<UpdateDealRequest> for DealPatch {
    fn from(request: UpdateDealRequest) -> Self {
        Self {
            name: request.name,
            description: request.description,
            value: request.value,
            stage: request.stage,
            probability: request.probability,
            close_date: request.close_date,
            contact_id: request.contact_id,
        }
    }
}

/// Aggregate payload for `GET /api/deals/stats/pipeline-value`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PipelineValueResponse {
    pub total_value: Decimal,
}

fn parse_stage(raw: &str) -> Result<DealStage, Error> {
    raw.parse::<DealStage>()
        .map_err(|err| Error::invalid_request(err.to_string()))
}

#[utoipa::path(
    get,
    path = "/api/deals",
    responses(
        (status = 200, description = "All deals", body = [DealResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["deals"],
    operation_id = "listDeals",
    security(("bearer_auth" = []))
)]
#[get("/deals")]
pub async fn list_deals(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListDeals)?;
    let deals = state.deals.list().await?;
    Ok(HttpResponse::Ok().json(deals.into_iter().map(DealResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/api/deals/contact/{contactId}",
    params(("contactId" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Deals for the contact", body = [DealResponse])
    ),
    tags = ["deals"],
    operation_id = "getDealsByContact",
    security(("bearer_auth" = []))
)]
#[get("/deals/contact/{contact_id}")]
pub async fn get_deals_by_contact(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListDeals)?;
    let deals = state.deals.list_by_contact(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(deals.into_iter().map(DealResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/api/deals/stage/{stage}",
    params(("stage" = String, Path, description = "Pipeline stage name")),
    responses(
        (status = 200, description = "Deals in the stage", body = [DealResponse]),
        (status = 400, description = "Unknown stage", body = Error)
    ),
    tags = ["deals"],
    operation_id = "getDealsByStage",
    security(("bearer_auth" = []))
)]
#[get("/deals/stage/{stage}")]
pub async fn get_deals_by_stage(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListDeals)?;
    let stage = parse_stage(&path.into_inner())?;
    let deals = state.deals.list_by_stage(stage).await?;
    Ok(HttpResponse::Ok().json(deals.into_iter().map(DealResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/api/deals/stats/pipeline-value",
    responses(
        (status = 200, description = "Total pipeline value", body = PipelineValueResponse)
    ),
    tags = ["deals"],
    operation_id = "getPipelineValue",
    security(("bearer_auth" = []))
)]
#[get("/deals/stats/pipeline-value")]
pub async fn get_pipeline_value(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListDeals)?;
    let total_value = state.deals.total_pipeline_value().await?;
    Ok(HttpResponse::Ok().json(PipelineValueResponse { total_value }))
}

#[utoipa::path(
    get,
    path = "/api/deals/closing-soon",
    responses(
        (status = 200, description = "Deals closing within thirty days", body = [DealResponse])
    ),
    tags = ["deals"],
    operation_id = "getDealsClosingSoon",
    security(("bearer_auth" = []))
)]
#[get("/deals/closing-soon")]
pub async fn get_deals_closing_soon(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListDeals)?;
    let deals = state.deals.closing_soon().await?;
    Ok(HttpResponse::Ok().json(deals.into_iter().map(DealResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/api/deals/high-probability",
    responses(
        (status = 200, description = "Deals at or above 75% probability", body = [DealResponse])
    ),
    tags = ["deals"],
    operation_id = "getHighProbabilityDeals",
    security(("bearer_auth" = []))
)]
#[get("/deals/high-probability")]
pub async fn get_high_probability_deals(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListDeals)?;
    let deals = state.deals.high_probability().await?;
    Ok(HttpResponse::Ok().json(deals.into_iter().map(DealResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/api/deals/{id}",
    params(("id" = Uuid, Path, description = "Deal id")),
    responses(
        (status = 200, description = "Deal", body = DealResponse),
        (status = 404, description = "No such deal", body = Error)
    ),
    tags = ["deals"],
    operation_id = "getDeal",
    security(("bearer_auth" = []))
)]
#[get("/deals/{id}")]
pub async fn get_deal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::GetDeal)?;
    let deal = state.deals.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(DealResponse::from(deal)))
}

#[utoipa::path(
    post,
    path = "/api/deals",
    request_body = CreateDealRequest,
    responses(
        (status = 201, description = "Deal created", body = DealResponse),
        (status = 400, description = "Missing or unknown contact", body = Error),
        (status = 403, description = "Forbidden", body = Error)
    ),
    tags = ["deals"],
    operation_id = "createDeal",
    security(("bearer_auth" = []))
)]
#[post("/deals")]
pub async fn create_deal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    payload: web::Json<CreateDealRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::CreateDeal)?;
    let payload = payload.into_inner();
    let contact_id = payload
        .contact_id
        .ok_or_else(|| Error::invalid_request("contactId is required"))?;
    let draft = DealDraft {
        name: payload.name,
        description: payload.description,
        value: payload.value,
        stage: payload.stage,
        probability: payload.probability,
        close_date: payload.close_date,
        contact_id,
    };
    let deal = state.deals.create(draft).await?;
    Ok(HttpResponse::Created().json(DealResponse::from(deal)))
}

#[utoipa::path(
    put,
    path = "/api/deals/{id}",
    params(("id" = Uuid, Path, description = "Deal id")),
    request_body = UpdateDealRequest,
    responses(
        (status = 200, description = "Deal updated", body = DealResponse),
        (status = 400, description = "Unknown contact", body = Error),
        (status = 404, description = "No such deal", body = Error)
    ),
    tags = ["deals"],
    operation_id = "updateDeal",
    security(("bearer_auth" = []))
)]
#[put("/deals/{id}")]
pub async fn update_deal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateDealRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::UpdateDeal)?;
    let deal = state
        .deals
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(DealResponse::from(deal)))
}

#[utoipa::path(
    delete,
    path = "/api/deals/{id}",
    params(("id" = Uuid, Path, description = "Deal id")),
    responses(
        (status = 200, description = "Deal deleted"),
        (status = 403, description = "Forbidden", body = Error),
        (status = 404, description = "No such deal", body = Error)
    ),
    tags = ["deals"],
    operation_id = "deleteDeal",
    security(("bearer_auth" = []))
)]
#[delete("/deals/{id}")]
pub async fn delete_deal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::DeleteDeal)?;
    state.deals.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

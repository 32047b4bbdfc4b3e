//! Activity API handlers, open to any authenticated caller.
//!
//! ```text
//! GET    /api/activities
//! GET    /api/activities/contact/{contactId}
//! GET    /api/activities/deal/{dealId}
//! GET    /api/activities/upcoming
//! GET    /api/activities/overdue
//! GET    /api/activities/completed
//! GET    /api/activities/kind/{kind}
//! GET    /api/activities/{id}
//! POST   /api/activities
//! PUT    /api/activities/{id}
//! DELETE /api/activities/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Activity, ActivityDraft, ActivityKind, ActivityPatch, Error, Operation};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedCaller;
use crate::inbound::http::state::HttpState;

/// Activity payload returned by every activity endpoint.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityResponse {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub subject: String,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completion_date: Option<DateTime<Utc>>,
    pub contact_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Activity> for ActivityResponse {
    fn from(activity: Activity) -> Self {
        Self {
            id: activity.id,
            kind: activity.kind,
            subject: activity.subject,
            notes: activity.notes,
            due_date: activity.due_date,
            completed: activity.completed,
            completion_date: activity.completion_date,
            contact_id: activity.contact_id,
            deal_id: activity.deal_id,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        }
    }
}

/// Creation request body. Both references are optional.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    pub kind: ActivityKind,
    pub subject: String,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub contact_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
}

impl From<CreateActivityRequest> for ActivityDraft {
    fn from(request: CreateActivityRequest) -> Self {
        Self {
            kind: request.kind,
            subject: request.subject,
            notes: request.notes,
            due_date: request.due_date,
            completed: request.completed,
            contact_id: request.contact_id,
            deal_id: request.deal_id,
        }
    }
}

/// Partial update body: absent fields leave stored values unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    pub kind: Option<ActivityKind>,
    pub subject: Option<String>,
    pub notes: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: Option<bool>,
    pub contact_id: Option<Uuid>,
    pub deal_id: Option<Uuid>,
}

impl From<UpdateActivityRequest> for ActivityPatch {
    fn from(request: UpdateActivityRequest) -> Self {
        Self {
            kind: request.kind,
            subject: request.subject,
            notes: request.notes,
            due_date: request.due_date,
            completed: request.completed,
            contact_id: request.contact_id,
            deal_id: request.deal_id,
        }
    }
}

fn parse_kind(raw: &str) -> Result<ActivityKind, Error> {
    raw.parse::<ActivityKind>()
        .map_err(|err| Error::invalid_request(err.to_string()))
}

fn to_responses(activities: Vec<Activity>) -> Vec<ActivityResponse> {
    activities.into_iter().map(ActivityResponse::from).collect()
}

#[utoipa::path(
    get,
    path = "/api/activities",
    responses(
        (status = 200, description = "All activities", body = [ActivityResponse]),
        (status = 401, description = "Unauthenticated", body = Error)
    ),
    tags = ["activities"],
    operation_id = "listActivities",
    security(("bearer_auth" = []))
)]
#[get("/activities")]
pub async fn list_activities(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListActivities)?;
    Ok(HttpResponse::Ok().json(to_responses(state.activities.list().await?)))
}

#[utoipa::path(
    get,
    path = "/api/activities/contact/{contactId}",
    params(("contactId" = Uuid, Path, description = "Contact id")),
    responses(
        (status = 200, description = "Activities for the contact", body = [ActivityResponse])
    ),
    tags = ["activities"],
    operation_id = "getActivitiesByContact",
    security(("bearer_auth" = []))
)]
#[get("/activities/contact/{contact_id}")]
pub async fn get_activities_by_contact(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListActivities)?;
    Ok(HttpResponse::Ok().json(to_responses(
        state.activities.list_by_contact(path.into_inner()).await?,
    )))
}

#[utoipa::path(
    get,
    path = "/api/activities/deal/{dealId}",
    params(("dealId" = Uuid, Path, description = "Deal id")),
    responses(
        (status = 200, description = "Activities for the deal", body = [ActivityResponse])
    ),
    tags = ["activities"],
    operation_id = "getActivitiesByDeal",
    security(("bearer_auth" = []))
)]
#[get("/activities/deal/{deal_id}")]
pub async fn get_activities_by_deal(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListActivities)?;
    Ok(HttpResponse::Ok().json(to_responses(
        state.activities.list_by_deal(path.into_inner()).await?,
    )))
}

#[utoipa::path(
    get,
    path = "/api/activities/upcoming",
    responses(
        (status = 200, description = "Activities due within 24 hours", body = [ActivityResponse])
    ),
    tags = ["activities"],
    operation_id = "getUpcomingActivities",
    security(("bearer_auth" = []))
)]
#[get("/activities/upcoming")]
pub async fn get_upcoming_activities(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListActivities)?;
    Ok(HttpResponse::Ok().json(to_responses(state.activities.upcoming().await?)))
}

#[utoipa::path(
    get,
    path = "/api/activities/overdue",
    responses(
        (status = 200, description = "Incomplete activities past their due date", body = [ActivityResponse])
    ),
    tags = ["activities"],
    operation_id = "getOverdueActivities",
    security(("bearer_auth" = []))
)]
#[get("/activities/overdue")]
pub async fn get_overdue_activities(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListActivities)?;
    Ok(HttpResponse::Ok().json(to_responses(state.activities.overdue().await?)))
}

#[utoipa::path(
    get,
    path = "/api/activities/completed",
    responses(
        (status = 200, description = "Completed activities", body = [ActivityResponse])
    ),
    tags = ["activities"],
    operation_id = "getCompletedActivities",
    security(("bearer_auth" = []))
)]
#[get("/activities/completed")]
pub async fn get_completed_activities(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListActivities)?;
    Ok(HttpResponse::Ok().json(to_responses(state.activities.completed().await?)))
}

#[utoipa::path(
    get,
    path = "/api/activities/kind/{kind}",
    params(("kind" = String, Path, description = "Activity kind name")),
    responses(
        (status = 200, description = "Activities of one kind", body = [ActivityResponse]),
        (status = 400, description = "Unknown kind", body = Error)
    ),
    tags = ["activities"],
    operation_id = "getActivitiesByKind",
    security(("bearer_auth" = []))
)]
#[get("/activities/kind/{kind}")]
pub async fn get_activities_by_kind(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::ListActivities)?;
    let kind = parse_kind(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(to_responses(state.activities.list_by_kind(kind).await?)))
}

#[utoipa::path(
    get,
    path = "/api/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Activity", body = ActivityResponse),
        (status = 404, description = "No such activity", body = Error)
    ),
    tags = ["activities"],
    operation_id = "getActivity",
    security(("bearer_auth" = []))
)]
#[get("/activities/{id}")]
pub async fn get_activity(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::GetActivity)?;
    let activity = state.activities.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ActivityResponse::from(activity)))
}

#[utoipa::path(
    post,
    path = "/api/activities",
    request_body = CreateActivityRequest,
    responses(
        (status = 201, description = "Activity created", body = ActivityResponse),
        (status = 400, description = "Unknown contact or deal reference", body = Error)
    ),
    tags = ["activities"],
    operation_id = "createActivity",
    security(("bearer_auth" = []))
)]
#[post("/activities")]
pub async fn create_activity(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    payload: web::Json<CreateActivityRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::CreateActivity)?;
    let activity = state.activities.create(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(ActivityResponse::from(activity)))
}

#[utoipa::path(
    put,
    path = "/api/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity id")),
    request_body = UpdateActivityRequest,
    responses(
        (status = 200, description = "Activity updated", body = ActivityResponse),
        (status = 400, description = "Unknown contact or deal reference", body = Error),
        (status = 404, description = "No such activity", body = Error)
    ),
    tags = ["activities"],
    operation_id = "updateActivity",
    security(("bearer_auth" = []))
)]
#[put("/activities/{id}")]
pub async fn update_activity(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateActivityRequest>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::UpdateActivity)?;
    let activity = state
        .activities
        .update(path.into_inner(), payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(ActivityResponse::from(activity)))
}

#[utoipa::path(
    delete,
    path = "/api/activities/{id}",
    params(("id" = Uuid, Path, description = "Activity id")),
    responses(
        (status = 200, description = "Activity deleted"),
        (status = 404, description = "No such activity", body = Error)
    ),
    tags = ["activities"],
    operation_id = "deleteActivity",
    security(("bearer_auth" = []))
)]
#[delete("/activities/{id}")]
pub async fn delete_activity(
    caller: AuthenticatedCaller,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    caller.require(Operation::DeleteActivity)?;
    state.activities.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().finish())
}

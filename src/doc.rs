//! OpenAPI documentation configuration.
//!
//! Defines [`ApiDoc`], the generated specification for the REST API:
//! every endpoint from the inbound layer, the request/response schemas,
//! and the bearer token security scheme. Swagger UI serves the document
//! in debug builds only.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{ActivityKind, DealStage, Error, ErrorCode, Role};
use crate::inbound::http::activities::{
    ActivityResponse, CreateActivityRequest, UpdateActivityRequest,
};
use crate::inbound::http::auth::{
    CallerResponse, IdentityResponse, LoginRequest, LoginResponse, RegisterRequest,
};
use crate::inbound::http::contacts::{ContactRequest, ContactResponse};
use crate::inbound::http::deals::{
    CreateDealRequest, DealResponse, PipelineValueResponse, UpdateDealRequest,
};
use crate::inbound::http::leads::{
    CreateLeadRequest, LeadResponse, UpdateLeadRequest, UpdateLeadStatusRequest,
};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /api/auth/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "CRM backend API",
        description = "Token-authenticated CRUD over leads, contacts, deals, and activities."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("bearer_auth" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::current_identity,
        crate::inbound::http::leads::list_leads,
        crate::inbound::http::leads::get_lead_by_email,
        crate::inbound::http::leads::get_lead,
        crate::inbound::http::leads::create_lead,
        crate::inbound::http::leads::update_lead,
        crate::inbound::http::leads::update_lead_status,
        crate::inbound::http::leads::delete_lead,
        crate::inbound::http::contacts::list_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::deals::list_deals,
        crate::inbound::http::deals::get_deals_by_contact,
        crate::inbound::http::deals::get_deals_by_stage,
        crate::inbound::http::deals::get_pipeline_value,
        crate::inbound::http::deals::get_deals_closing_soon,
        crate::inbound::http::deals::get_high_probability_deals,
        crate::inbound::http::deals::get_deal,
        crate::inbound::http::deals::create_deal,
        crate::inbound::http::deals::update_deal,
        crate::inbound::http::deals::delete_deal,
        crate::inbound::http::activities::list_activities,
        crate::inbound::http::activities::get_activities_by_contact,
        crate::inbound::http::activities::get_activities_by_deal,
        crate::inbound::http::activities::get_upcoming_activities,
        crate::inbound::http::activities::get_overdue_activities,
        crate::inbound::http::activities::get_completed_activities,
        crate::inbound::http::activities::get_activities_by_kind,
        crate::inbound::http::activities::get_activity,
        crate::inbound::http::activities::create_activity,
        crate::inbound::http::activities::update_activity,
        crate::inbound::http::activities::delete_activity,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Role,
        DealStage,
        ActivityKind,
        LoginRequest,
        LoginResponse,
        RegisterRequest,
        IdentityResponse,
        CallerResponse,
        LeadResponse,
        CreateLeadRequest,
        UpdateLeadRequest,
        UpdateLeadStatusRequest,
        ContactRequest,
        ContactResponse,
        DealResponse,
        CreateDealRequest,
        UpdateDealRequest,
        PipelineValueResponse,
        ActivityResponse,
        CreateActivityRequest,
        UpdateActivityRequest,
    )),
    tags(
        (name = "auth", description = "Registration, login, and caller identification"),
        (name = "leads", description = "Prospect records, gated to ADMIN and MANAGER"),
        (name = "contacts", description = "Qualified people"),
        (name = "deals", description = "Pipeline opportunities and statistics"),
        (name = "activities", description = "Calls, emails, meetings, and tasks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_registers_the_full_surface() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/auth/login",
            "/api/leads/email/{email}",
            "/api/deals/stats/pipeline-value",
            "/api/activities/kind/{kind}",
        ] {
            assert!(paths.contains_key(path), "missing path {path}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer_auth"));
    }
}

//! HTTP inbound adapter exposing the REST endpoints.

pub mod activities;
pub mod auth;
pub mod bearer;
pub mod contacts;
pub mod deals;
pub mod leads;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use crate::domain::ApiResult;

use actix_web::web;

/// Register the full `/api` surface on a service config.
///
/// Shared between the server assembly and handler tests so both exercise
/// identical routing. Literal path segments are registered before the
/// `/{id}` routes they would otherwise shadow.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(auth::login)
            .service(auth::register)
            .service(auth::current_identity)
            .service(leads::list_leads)
            .service(leads::get_lead_by_email)
            .service(leads::get_lead)
            .service(leads::create_lead)
            .service(leads::update_lead_status)
            .service(leads::update_lead)
            .service(leads::delete_lead)
            .service(contacts::list_contacts)
            .service(contacts::get_contact)
            .service(contacts::create_contact)
            .service(contacts::update_contact)
            .service(contacts::delete_contact)
            .service(deals::list_deals)
            .service(deals::get_deals_by_contact)
            .service(deals::get_deals_by_stage)
            .service(deals::get_pipeline_value)
            .service(deals::get_deals_closing_soon)
            .service(deals::get_high_probability_deals)
            .service(deals::get_deal)
            .service(deals::create_deal)
            .service(deals::update_deal)
            .service(deals::delete_deal)
            .service(activities::list_activities)
            .service(activities::get_activities_by_contact)
            .service(activities::get_activities_by_deal)
            .service(activities::get_upcoming_activities)
            .service(activities::get_overdue_activities)
            .service(activities::get_completed_activities)
            .service(activities::get_activities_by_kind)
            .service(activities::get_activity)
            .service(activities::create_activity)
            .service(activities::update_activity)
            .service(activities::delete_activity),
    );
}

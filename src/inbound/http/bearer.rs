//! Bearer-token authentication extractor.
//!
//! Handlers that take an [`AuthenticatedCaller`] parameter only run once the
//! `Authorization` header carries a token that validates and whose subject
//! still exists. Role checks stay in the handlers, so a missing token is
//! always a 401 and an insufficient role always a 403.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;
use uuid::Uuid;

use crate::domain::{Error, Operation, Role, authorize};
use crate::inbound::http::state::HttpState;

/// The resolved identity behind a validated bearer token.
///
/// The role is re-read from the identity store on every request rather than
/// trusted from the token, so role changes bite immediately.
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthenticatedCaller {
    /// Check that this caller's role may perform the operation.
    pub fn require(&self, operation: Operation) -> Result<(), Error> {
        authorize(self.role, operation)
    }
}

fn bearer_token(req: &HttpRequest) -> Result<String, Error> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("missing bearer token"))?;
    let value = header
        .to_str()
        .map_err(|_| Error::unauthorized("invalid authorization header"))?;
    value
        .strip_prefix("Bearer ")
        .map(str::to_owned)
        .ok_or_else(|| Error::unauthorized("invalid authorization header"))
}

impl FromRequest for AuthenticatedCaller {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let state = req
                .app_data::<web::Data<HttpState>>()
                .ok_or_else(|| Error::internal("http state is not configured"))?;
            let token = bearer_token(&req)?;
            let claims = state.tokens.validate(&token)?;
            let identity = state.auth.identity_for_claims(&claims).await?;
            Ok(Self {
                id: identity.id,
                email: identity.email,
                role: identity.role,
            })
        })
    }
}

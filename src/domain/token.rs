//! Stateless session token issuance and validation.
//!
//! Tokens are compact HS512 JWS strings carrying `{sub, iat, exp}`. The
//! signing key is symmetric and read-only after startup, so validation is a
//! pure computation. Every validation failure collapses into one opaque
//! `unauthorized` error so callers learn nothing about which check failed;
//! the underlying cause is logged at debug level only.
//!
//! There is no revocation: a token stays valid for its full TTL window
//! regardless of later account changes.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use tracing::debug;

use super::auth::SessionClaims;
use super::error::Error;

/// HS512 requires a key of at least 512 / 2 = 256 bits.
const MIN_KEY_BYTES: usize = 32;

/// Error raised when the token service is misconfigured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenConfigError {
    /// The signing key is shorter than 256 bits.
    #[error("signing key must be at least {MIN_KEY_BYTES} bytes, got {actual}")]
    KeyTooShort { actual: usize },
}

/// Issues and validates signed session tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

// Manual impl: the jsonwebtoken keys carry secret material and must not
// reach log output.
impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    /// Create a token service from a symmetric key and token lifetime.
    ///
    /// A negative `ttl` is accepted deliberately: it produces tokens that
    /// are already expired, which keeps expiry tests free of sleeps.
    ///
    /// # Examples
    /// ```
    /// use chrono::Duration;
    /// use crm_backend::domain::TokenService;
    ///
    /// let service = TokenService::new(&[0x42; 32], Duration::hours(24)).unwrap();
    /// let token = service.issue("ada@example.com").unwrap();
    /// assert_eq!(service.validate(&token).unwrap().sub, "ada@example.com");
    /// ```
    pub fn new(key: &[u8], ttl: Duration) -> Result<Self, TokenConfigError> {
        if key.len() < MIN_KEY_BYTES {
            return Err(TokenConfigError::KeyTooShort { actual: key.len() });
        }
        Ok(Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            ttl,
        })
    }

    /// Issue a signed token for the given subject email.
    pub fn issue(&self, subject_email: &str) -> Result<String, Error> {
        self.issue_at(subject_email, Utc::now())
    }

    fn issue_at(&self, subject_email: &str, now: DateTime<Utc>) -> Result<String, Error> {
        let claims = SessionClaims {
            sub: subject_email.to_owned(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS512), &claims, &self.encoding)
            .map_err(|err| Error::internal(format!("failed to sign session token: {err}")))
    }

    /// Validate a token's signature and expiry and return its claims.
    ///
    /// Structural, signature, and expiry failures are indistinguishable to
    /// the caller.
    pub fn validate(&self, token: &str) -> Result<SessionClaims, Error> {
        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        match decode::<SessionClaims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims),
            Err(err) => {
                debug!(error = %err, "session token rejected");
                Err(Error::unauthorized("invalid token"))
            }
        }
    }
}

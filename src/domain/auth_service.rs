//! Registration, login, and token-subject resolution.
//!
//! Login failures are deliberately opaque: unknown email, wrong password,
//! and disabled account all produce the same 401 so the endpoint cannot be
//! used to probe which emails are registered.

use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{IdentityRepository, PasswordHasher};
use crate::domain::{Error, Identity, LoginCredentials, Role, SessionClaims};

/// Fields accepted when registering a new identity.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    /// Defaults to [`Role::User`] when absent.
    pub role: Option<Role>,
}

/// Identity management service backed by the credential store.
#[derive(Clone)]
pub struct AuthService {
    identities: Arc<dyn IdentityRepository>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
    pub fn new(identities: Arc<dyn IdentityRepository>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { identities, hasher }
    }

    /// Create a new identity from a registration request.
    ///
    /// Rejects an email already present in the store with a 400; the
    /// password is hashed before anything is persisted.
    pub async fn register(&self, registration: Registration) -> Result<Identity, Error> {
        let email = registration.email.trim().to_owned();
        if email.is_empty() {
            return Err(Error::invalid_request("email must not be empty"));
        }
        if registration.password.is_empty() {
            return Err(Error::invalid_request("password must not be empty"));
        }
        if self.identities.exists_by_email(&email).await? {
            return Err(Error::invalid_request("email is already in use"));
        }

        let password_hash = self
            .hasher
            .hash(&registration.password)
            .map_err(|err| Error::internal(err.to_string()))?;
        let now = Utc::now();
        let identity = Identity {
            id: Uuid::new_v4(),
            first_name: registration.first_name,
            last_name: registration.last_name,
            email,
            password_hash,
            role: registration.role.unwrap_or(Role::User),
            enabled: true,
            created_at: now,
            updated_at: now,
        };
        self.identities.save(&identity).await?;
        Ok(identity)
    }

    /// Authenticate a set of credentials, returning the matching identity.
    ///
    /// Every failure mode yields the same opaque error.
    pub async fn login(&self, credentials: LoginCredentials) -> Result<Identity, Error> {
        let Some(identity) = self.identities.find_by_email(credentials.email()).await? else {
            debug!(email = credentials.email(), "login rejected: unknown email");
            return Err(Self::bad_credentials());
        };
        if !identity.enabled {
            debug!(email = credentials.email(), "login rejected: account disabled");
            return Err(Self::bad_credentials());
        }
        let matches = self
            .hasher
            .verify(credentials.password(), &identity.password_hash)
            .map_err(|err| Error::internal(err.to_string()))?;
        if !matches {
            debug!(email = credentials.email(), "login rejected: wrong password");
            return Err(Self::bad_credentials());
        }
        Ok(identity)
    }

    /// Resolve the identity behind validated session claims.
    ///
    /// The role is re-read from the store on every request, so a role change
    /// takes effect immediately even while old tokens remain valid. A
    /// subject whose record has disappeared gets the same opaque 401 as an
    /// invalid token.
    pub async fn identity_for_claims(&self, claims: &SessionClaims) -> Result<Identity, Error> {
        match self.identities.find_by_email(&claims.sub).await? {
            Some(identity) => Ok(identity),
            None => {
                debug!(subject = %claims.sub, "token subject no longer exists");
                Err(Error::unauthorized("invalid token"))
            }
        }
    }

    fn bad_credentials() -> Error {
        Error::unauthorized("invalid credentials")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockIdentityRepository, MockPasswordHasher, RepositoryError};
    use mockall::predicate::eq;

    fn identity(email: &str, enabled: bool) -> Identity {
        let now = Utc::now();
        Identity {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            password_hash: "$2b$04$stored-hash".into(),
            role: Role::User,
            enabled,
            created_at: now,
            updated_at: now,
        }
    }

    fn service(identities: MockIdentityRepository, hasher: MockPasswordHasher) -> AuthService {
        AuthService::new(Arc::new(identities), Arc::new(hasher))
    }

    fn registration() -> Registration {
        Registration {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password: "secret".into(),
            role: None,
        }
    }

    #[tokio::test]
    async fn register_persists_a_hashed_identity() {
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_exists_by_email()
            .with(eq("ada@example.com"))
            .times(1)
            .return_once(|_| Ok(false));
        identities
            .expect_save()
            .withf(|identity| {
                identity.email == "ada@example.com"
                    && identity.password_hash == "hashed"
                    && identity.role == Role::User
                    && identity.enabled
                    && identity.created_at == identity.updated_at
            })
            .times(1)
            .return_once(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .with(eq("secret"))
            .times(1)
            .return_once(|_| Ok("hashed".into()));

        let saved = service(identities, hasher)
            .register(registration())
            .await
            .expect("registration succeeds");
        assert_eq!(saved.role, Role::User);
    }

    #[tokio::test]
    async fn register_rejects_duplicate_email_with_invalid_request() {
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_exists_by_email()
            .times(1)
            .return_once(|_| Ok(true));
        let err = service(identities, MockPasswordHasher::new())
            .register(registration())
            .await
            .expect_err("duplicate email");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, "email is already in use");
    }

    #[tokio::test]
    async fn register_honours_requested_role() {
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_exists_by_email()
            .return_once(|_| Ok(false));
        identities
            .expect_save()
            .withf(|identity| identity.role == Role::Manager)
            .return_once(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().return_once(|_| Ok("hashed".into()));

        let saved = service(identities, hasher)
            .register(Registration {
                role: Some(Role::Manager),
                ..registration()
            })
            .await
            .expect("registration succeeds");
        assert_eq!(saved.role, Role::Manager);
    }

    #[tokio::test]
    async fn register_trims_the_email() {
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_exists_by_email()
            .with(eq("ada@example.com"))
            .return_once(|_| Ok(false));
        identities
            .expect_save()
            .withf(|identity| identity.email == "ada@example.com")
            .return_once(|_| Ok(()));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().return_once(|_| Ok("hashed".into()));

        service(identities, hasher)
            .register(Registration {
                email: "  ada@example.com  ".into(),
                ..registration()
            })
            .await
            .expect("registration succeeds");
    }

    #[tokio::test]
    async fn login_failures_share_one_opaque_error() {
        // Unknown email.
        let mut identities = MockIdentityRepository::new();
        identities.expect_find_by_email().return_once(|_| Ok(None));
        let unknown = service(identities, MockPasswordHasher::new())
            .login(LoginCredentials::try_from_parts("a@x.com", "pw").expect("valid"))
            .await
            .expect_err("unknown email fails");

        // Disabled account.
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_find_by_email()
            .return_once(|_| Ok(Some(identity("a@x.com", false))));
        let disabled = service(identities, MockPasswordHasher::new())
            .login(LoginCredentials::try_from_parts("a@x.com", "pw").expect("valid"))
            .await
            .expect_err("disabled account fails");

        // Wrong password.
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_find_by_email()
            .return_once(|_| Ok(Some(identity("a@x.com", true))));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().return_once(|_, _| Ok(false));
        let wrong = service(identities, hasher)
            .login(LoginCredentials::try_from_parts("a@x.com", "pw").expect("valid"))
            .await
            .expect_err("wrong password fails");

        for err in [unknown, disabled, wrong] {
            assert_eq!(err.code, ErrorCode::Unauthorized);
            assert_eq!(err.message, "invalid credentials");
        }
    }

    #[tokio::test]
    async fn login_returns_the_identity_on_success() {
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_find_by_email()
            .with(eq("a@x.com"))
            .return_once(|_| Ok(Some(identity("a@x.com", true))));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .with(eq("pw"), eq("$2b$04$stored-hash"))
            .return_once(|_, _| Ok(true));

        let found = service(identities, hasher)
            .login(LoginCredentials::try_from_parts("a@x.com", "pw").expect("valid"))
            .await
            .expect("login succeeds");
        assert_eq!(found.email, "a@x.com");
    }

    #[tokio::test]
    async fn claims_for_missing_subject_are_rejected() {
        let mut identities = MockIdentityRepository::new();
        identities.expect_find_by_email().return_once(|_| Ok(None));
        let claims = SessionClaims {
            sub: "gone@x.com".into(),
            iat: 0,
            exp: i64::MAX,
        };
        let err = service(identities, MockPasswordHasher::new())
            .identity_for_claims(&claims)
            .await
            .expect_err("subject is gone");
        assert_eq!(err.code, ErrorCode::Unauthorized);
        assert_eq!(err.message, "invalid token");
    }

    #[tokio::test]
    async fn store_connection_failures_surface_as_service_unavailable() {
        let mut identities = MockIdentityRepository::new();
        identities
            .expect_find_by_email()
            .return_once(|_| Err(RepositoryError::connection("refused")));
        let err = service(identities, MockPasswordHasher::new())
            .login(LoginCredentials::try_from_parts("a@x.com", "pw").expect("valid"))
            .await
            .expect_err("store is down");
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);
    }
}

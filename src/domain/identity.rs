//! Identity records and the closed role set.
//!
//! An identity is the credential-bearing account created on registration.
//! The password hash never leaves the domain layer; the HTTP DTOs expose
//! everything else.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Fixed, non-hierarchical role set gating API operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    /// Stable wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::User => "USER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "MANAGER" => Ok(Role::Manager),
            "USER" => Ok(Role::User),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Credential-bearing account record.
///
/// ## Invariants
/// - `email` is unique within the identity store (case-sensitive as stored).
/// - `password_hash` is a salted bcrypt hash; the salt is embedded in it.
/// - `created_at` is stamped once; `updated_at` refreshes on any mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ADMIN", Role::Admin)]
    #[case("MANAGER", Role::Manager)]
    #[case("USER", Role::User)]
    fn parses_known_roles(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>().expect("known role"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("admin")]
    #[case("SUPERUSER")]
    #[case("")]
    fn rejects_unknown_roles(#[case] raw: &str) {
        let err = raw.parse::<Role>().expect_err("unknown role");
        assert_eq!(err, UnknownRole(raw.to_owned()));
    }

    #[test]
    fn role_serializes_uppercase() {
        let json = serde_json::to_string(&Role::Manager).expect("serialize role");
        assert_eq!(json, "\"MANAGER\"");
    }
}

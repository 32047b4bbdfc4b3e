//! HTTP server configuration drawn from the environment.

use std::env;
use std::net::SocketAddr;

use chrono::Duration;
use tracing::warn;
use uuid::Uuid;
use zeroize::Zeroizing;

const BIND_ADDR_VAR: &str = "CRM_BIND_ADDR";
const SIGNING_KEY_VAR: &str = "CRM_JWT_SECRET";
const TOKEN_TTL_VAR: &str = "CRM_JWT_TTL_SECS";
const ALLOW_EPHEMERAL_VAR: &str = "CRM_ALLOW_EPHEMERAL_SECRET";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TOKEN_TTL_SECS: i64 = 86_400;

/// Settings for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) signing_key: Zeroizing<Vec<u8>>,
    pub(crate) token_ttl: Duration,
}

impl ServerConfig {
    /// Construct a server configuration with explicit values.
    #[must_use]
    pub fn new(bind_addr: SocketAddr, signing_key: Vec<u8>, token_ttl: Duration) -> Self {
        Self {
            bind_addr,
            signing_key: Zeroizing::new(signing_key),
            token_ttl,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `CRM_JWT_SECRET` is mandatory in release builds. Debug builds, or
    /// any build with `CRM_ALLOW_EPHEMERAL_SECRET=1`, fall back to a
    /// random key; tokens issued against it do not survive a restart.
    ///
    /// # Errors
    /// Returns [`std::io::Error`] when an environment value cannot be
    /// parsed or the signing key is missing in a release build.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var(BIND_ADDR_VAR)
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|e| std::io::Error::other(format!("invalid {BIND_ADDR_VAR}: {e}")))?;

        let signing_key = match env::var(SIGNING_KEY_VAR) {
            Ok(secret) => Zeroizing::new(secret.into_bytes()),
            Err(_) => {
                let allow_dev = env::var(ALLOW_EPHEMERAL_VAR).ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!("using ephemeral token signing key (dev only)");
                    ephemeral_key()
                } else {
                    return Err(std::io::Error::other(format!("{SIGNING_KEY_VAR} is not set")));
                }
            }
        };

        let ttl_secs = match env::var(TOKEN_TTL_VAR) {
            Ok(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    std::io::Error::other(format!(
                        "invalid {TOKEN_TTL_VAR}: expected a positive number of seconds"
                    ))
                })?,
            Err(_) => DEFAULT_TOKEN_TTL_SECS,
        };

        Ok(Self {
            bind_addr,
            signing_key,
            token_ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

/// Random 32 byte key for development runs without a configured secret.
fn ephemeral_key() -> Zeroizing<Vec<u8>> {
    let mut key = Vec::with_capacity(32);
    key.extend_from_slice(Uuid::new_v4().as_bytes());
    key.extend_from_slice(Uuid::new_v4().as_bytes());
    Zeroizing::new(key)
}

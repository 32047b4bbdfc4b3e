//! Service entry-point: tracing setup, configuration, and server start.

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crm_backend::server::{ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from_env()?;
    create_server(config)?.await
}

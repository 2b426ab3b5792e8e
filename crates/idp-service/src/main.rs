mod config;
mod errors;
mod handlers;
mod models;
mod observability;
mod routes;
mod services;

use config::IdpConfig;
use common::credentials::{CredentialError, MemoryCredentialStore};
use common::jwt::TrustDomain;
use handlers::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Demo principals for the reference deployment. A real deployment would
/// inject a directory-backed `CredentialStore` instead.
fn demo_credential_store() -> Result<MemoryCredentialStore, CredentialError> {
    let mut store = MemoryCredentialStore::new();
    store.insert_user("analyst", "analyst", "analyst")?;
    store.insert_user("contractor", "contractor", "contractor")?;
    // Keep an admin for sensitive-route walkthroughs.
    store.insert_user("admin", "admin", "admin")?;
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "idp_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Identity Provider");

    // Load configuration
    let config = IdpConfig::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    let domain = TrustDomain::new(config.jwt_secret.clone(), config.jwt_algorithm);
    let store = Arc::new(demo_credential_store()?);

    info!("Credential store initialized");

    // Parse bind address before moving config
    let bind_address = config.bind_address.clone();

    let state = Arc::new(AppState {
        config,
        domain,
        store,
    });

    let app = routes::build_routes(state);

    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Identity Provider listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

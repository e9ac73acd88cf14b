use auth_service::config::Config;
use auth_service::credentials::InMemoryCredentialStore;
use auth_service::handlers::auth_handler::AppState;
use auth_service::routes;
use auth_service::services::security_service::SecurityService;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gym authentication service");

    // Load configuration
    let config = Config::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Configuration loaded successfully");

    // Build the credential store, seeded from file when configured
    let store = match &config.users_file {
        Some(path) => {
            info!(path = %path, "Seeding credential store from file");
            InMemoryCredentialStore::from_seed_file(Path::new(path), config.bcrypt_cost).map_err(
                |e| {
                    error!("Failed to seed credential store: {}", e);
                    e
                },
            )?
        }
        None => {
            warn!("No users file configured; every login will fail");
            InMemoryCredentialStore::new()
        }
    };
    info!(users = store.len(), "Credential store ready");

    let security = Arc::new(SecurityService::new(&config, Arc::new(store)));

    let bind_address = config.bind_address.clone();

    // Create application state
    let state = Arc::new(AppState { security });

    // Build application routes
    let app = routes::build_routes(state);

    // Parse bind address
    let addr: SocketAddr = bind_address.parse().map_err(|e| {
        error!("Invalid bind address: {}", e);
        e
    })?;

    info!("Authentication service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

//! Campus API Service
//!
//! REST API exposing CRUD over the student and review collections, each
//! persisted as a flat JSON array document on disk.

use anyhow::{Context, Result};
use campus_api::{config::Config, create_router, AppState, COLLECTIONS};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to load configuration")?;

    info!("Starting Campus API Service");
    info!("Data directory: {}", config.data_dir.display());

    // Seed missing collection files with empty arrays
    config
        .ensure_data_files()
        .context("Failed to prepare data directory")?;

    // Create application state
    let state = AppState::new(&config.data_dir);

    // Create router
    let app = create_router(state);

    // Bind and serve
    let listener = tokio::net::TcpListener::bind(&config.api_address())
        .await
        .with_context(|| format!("Failed to bind to {}", config.api_address()))?;

    info!("Campus API listening on {}", config.api_address());
    info!("Health check: http://{}/health", config.api_address());
    info!("API endpoints:");
    for name in COLLECTIONS {
        info!("  POST /{} - Create a record", name);
        info!("  GET /{} - List records", name);
        info!("  GET /{}/{{id}} - Get one record", name);
        info!("  PUT /{}/{{id}} - Replace a record", name);
        info!("  DELETE /{}/{{id}} - Delete a record", name);
    }

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

//! Planner HTTP Server Binary
//!
//! This is the main entry point for the planner REST API server. It loads
//! configuration, initializes the repository, seeds the course catalog, sets
//! up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin planner-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `JWT_SECRET`: Token signing secret (a dev-only default is used if unset)
//! - `CATALOG_PATH`: Catalog seed JSON file (overrides planner.toml)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use planner_rust::db::{RepositoryConfig, RepositoryFactory};
use planner_rust::http::{create_router, AppState};
use planner_rust::services::{catalog, CartPolicy};

/// Signing secret used when `JWT_SECRET` is not set. Fine for local
/// development, never for a deployment.
const DEV_JWT_SECRET: &str = "planner-dev-secret";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting planner HTTP server");

    // Configuration file is optional; defaults are a local repository with an
    // empty catalog.
    let config = RepositoryConfig::from_default_location().unwrap_or_else(|_| {
        info!("No planner.toml found, using defaults");
        RepositoryConfig::default()
    });

    let repo_type = config
        .repository_type()
        .map_err(|e| anyhow::anyhow!("Invalid repository type: {}", e))?;
    let repository = RepositoryFactory::create(repo_type)
        .map_err(|e| anyhow::anyhow!("Failed to create repository: {}", e))?;
    info!("Repository initialized ({:?})", repo_type);

    // Seed the catalog: CATALOG_PATH wins over the config file.
    let catalog_path = env::var("CATALOG_PATH").ok().or(config.catalog.path);
    match catalog_path {
        Some(path) => {
            let courses = catalog::load_catalog_file(&path)?;
            let count = repository
                .replace_catalog(courses)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to seed catalog: {}", e))?;
            info!("Seeded {} catalog entries from {}", count, path);
        }
        None => warn!("No catalog seed configured, starting with an empty catalog"),
    }

    let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
        warn!("JWT_SECRET not set, using the development default");
        DEV_JWT_SECRET.to_string()
    });

    // Create application state
    let state = AppState::new(repository, CartPolicy::default(), jwt_secret);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

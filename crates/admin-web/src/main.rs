//! Admin web interface for AgentHub.
//!
//! Server-rendered dashboard (askama + HTMX) for agents, prompts and users,
//! plus a JSON API over the same operations.

mod config;
mod error;
mod nav;
mod preview;
mod routes;
mod session;
mod state;

use database::Database;
use tower_http::services::ServeDir;
use tracing::info;

use crate::config::Config;
use crate::state::{AppState, Owner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting admin web server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    // Build application state
    let state = AppState::new(db, Owner::new(config.owner_id));

    // Build router
    let app = routes::router()
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .with_state(state);

    // Start server
    info!(addr = %config.addr, "Admin web server listening");
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

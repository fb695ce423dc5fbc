//! agenda-server — Appointment scheduling backend for small service businesses
//!
//! Long-running service that:
//! - Serves the public booking flow (catalog, free slots, appointment creation)
//! - Collects the Pix deposit self-report and stages payment verification
//! - Provides the operator API (JWT authenticated) for catalog, team,
//!   availability template and appointment lifecycle management

mod api;
mod auth;
mod config;
mod db;
mod error;
mod scheduling;
mod state;
mod util;

use config::Config;
use state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agenda_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting agenda-server (env: {})", config.environment);

    // Connect the pool and run pending migrations
    let state = AppState::new(&config).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("agenda-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

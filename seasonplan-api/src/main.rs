//! # Seasonplan API Server
//!
//! The web entry point of the seasonplan task planner: session-based
//! authentication and category-grouped task CRUD over a JSON API, plus a
//! plain-text export endpoint the chat bot relays onward.
//!
//! ## Usage
//!
//! ```bash
//! DATABASE_URL=postgresql://localhost/seasonplan cargo run -p seasonplan-api
//! ```

use seasonplan_api::{
    app::{build_router, AppState},
    config::Config,
};
use seasonplan_shared::{
    auth::session::SessionStore,
    db::{migrations::run_migrations, pool::create_pool, pool::DatabaseConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seasonplan_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "Seasonplan API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = Config::from_env()?;

    // Initialize database pool and run migrations
    let pool = create_pool(DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;
    run_migrations(&pool).await?;

    // Sessions are process-local; a restart logs everyone out
    let sessions = SessionStore::new();

    // Build Axum application
    let bind_address = config.bind_address();
    let state = AppState::new(pool, sessions, config);
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown signal received, exiting...");
        })
        .await?;

    Ok(())
}

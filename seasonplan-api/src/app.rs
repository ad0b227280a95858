/// Application state and router builder
///
/// This module defines the shared application state, the session-token
/// extractor used by every authenticated route, and the function that
/// builds the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use seasonplan_api::{app::{build_router, AppState}, config::Config};
/// use seasonplan_shared::auth::session::SessionStore;
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, SessionStore::new(), config);
/// let app = build_router(state);
/// # let _ = app;
/// # Ok(())
/// # }
/// ```
use crate::{config::Config, error::ApiError, middleware::security::SecurityHeadersLayer};
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use seasonplan_shared::{auth::session::SessionStore, planner::PlannerService};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor. The
/// session store is injected here at construction time; nothing in the
/// request path reaches for ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (health checks query it directly)
    pub db: PgPool,

    /// Use-case service: session gate + credential store + task store
    pub planner: PlannerService,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, sessions: SessionStore, config: Config) -> Self {
        Self {
            planner: PlannerService::new(db.clone(), sessions),
            db,
            config: Arc::new(config),
        }
    }
}

/// Bearer session token extracted from the Authorization header
///
/// Extraction only peels the header; resolution against the session store
/// happens inside the planner service, which returns `Unauthenticated` for
/// unknown tokens. A missing header short-circuits to 401 here.
pub struct SessionToken(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for SessionToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                ApiError::Unauthorized("Missing authorization header".to_string())
            })?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::BadRequest("Expected Bearer token".to_string()))?;

        Ok(SessionToken(token.to_string()))
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                     # Health check (public)
/// └── /v1/                        # API v1 (versioned)
///     ├── /auth/
///     │   ├── POST /register      # Create account (public)
///     │   ├── POST /login         # Start session (public)
///     │   └── POST /logout        # End session
///     └── /tasks/
///         ├── GET    /            # List tasks grouped by category
///         ├── POST   /            # Add task
///         ├── GET    /export      # Plain-text report
///         ├── POST   /:id/toggle  # Flip completion
///         ├── PUT    /:id         # Edit content/category
///         └── DELETE /:id         # Delete task
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Security headers
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (register/login public; logout needs a token but unknown
    // tokens are a no-op there)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login))
        .route("/logout", post(routes::auth::logout));

    // Task routes; each handler passes its session token to the planner
    // service, which guards every use case
    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/", post(routes::tasks::add_task))
        .route("/export", get(routes::tasks::export_tasks))
        .route("/:id/toggle", post(routes::tasks::toggle_task))
        .route("/:id", put(routes::tasks::edit_task))
        .route("/:id", delete(routes::tasks::delete_task));

    // Build complete v1 API
    let v1_routes = Router::new()
        .nest("/auth", auth_routes)
        .nest("/tasks", task_routes);

    // Configure CORS based on environment
    let cors = if state.config.api.cors_origins.contains(&"*".to_string()) {
        // Development mode: permissive CORS
        CorsLayer::permissive()
    } else {
        // Production mode: configure allowed origins
        let origins: Vec<HeaderValue> = state
            .config
            .api
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PUT,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
            .allow_credentials(true)
            .max_age(std::time::Duration::from_secs(3600))
    };

    // Combine all routes with middleware stack
    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors)
        .layer(SecurityHeadersLayer::new(state.config.api.production))
        .with_state(state)
}

/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup (migrations) and per-user cleanup
/// - Router construction with a fresh session store per test
/// - Request helpers for the JSON API
///
/// Tests require a running PostgreSQL reachable via `DATABASE_URL`.
use axum::body::Body;
use axum::http::{Request, StatusCode};
use seasonplan_api::app::{build_router, AppState};
use seasonplan_api::config::{ApiConfig, Config, DatabaseConfig};
use seasonplan_shared::auth::session::SessionStore;
use seasonplan_shared::models::user::User;
use serde_json::Value;
use sqlx::PgPool;
use tower::Service as _;
use uuid::Uuid;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a new test context with a migrated database and fresh sessions
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")?;
        let db = PgPool::connect(&database_url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../migrations").run(&db).await?;

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections: 5,
            },
        };

        let state = AppState::new(db.clone(), SessionStore::new(), config);
        let app = build_router(state);

        Ok(TestContext { db, app })
    }

    /// Generates a username that cannot collide across test runs
    pub fn unique_username(prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }

    /// Registers a user through the API, returning the new user id
    pub async fn register(&self, username: &str, password: &str) -> Uuid {
        let (status, body) = self
            .post_json(
                "/v1/auth/register",
                None,
                serde_json::json!({
                    "username": username,
                    "password": password,
                    "password_confirm": password,
                }),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "register failed: {}", body);
        Uuid::parse_str(body["user_id"].as_str().expect("user_id missing")).unwrap()
    }

    /// Logs a user in through the API, returning the session token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let (status, body) = self
            .post_json(
                "/v1/auth/login",
                None,
                serde_json::json!({ "username": username, "password": password }),
            )
            .await;

        assert_eq!(status, StatusCode::OK, "login failed: {}", body);
        body["token"].as_str().expect("token missing").to_string()
    }

    /// Registers and logs in a fresh user in one go
    pub async fn register_and_login(&self, prefix: &str) -> (Uuid, String, String) {
        let username = Self::unique_username(prefix);
        let user_id = self.register(&username, "secret123").await;
        let token = self.login(&username, "secret123").await;
        (user_id, token, username)
    }

    /// Sends a JSON request, returning status and parsed body
    ///
    /// Non-JSON bodies (204s, plain text) come back as `Value::Null` /
    /// `Value::String`.
    pub async fn send(
        &self,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(token) = token {
            builder = builder.header("authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().call(request).await.unwrap();
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
        };

        (status, value)
    }

    /// POST with a JSON body
    pub async fn post_json(
        &self,
        uri: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.send("POST", uri, token, Some(body)).await
    }

    /// Adds a task through the API, returning its id
    pub async fn add_task(&self, token: &str, content: &str, category: &str) -> Uuid {
        let (status, body) = self
            .post_json(
                "/v1/tasks",
                Some(token),
                serde_json::json!({ "content": content, "category": category }),
            )
            .await;

        assert_eq!(status, StatusCode::CREATED, "add_task failed: {}", body);
        Uuid::parse_str(body["task_id"].as_str().expect("task_id missing")).unwrap()
    }

    /// Deletes test users; tasks go with them via the FK cascade
    pub async fn cleanup_users(&self, user_ids: &[Uuid]) -> anyhow::Result<()> {
        for id in user_ids {
            User::delete(&self.db, *id).await?;
        }
        Ok(())
    }
}

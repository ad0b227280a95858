/// User model and database operations
///
/// This module provides the User model and the credential store: account
/// creation with a derived password hash, and credential verification for
/// login. The plaintext password never reaches the database.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     username VARCHAR(80) NOT NULL UNIQUE,
///     password_hash VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// # Example
///
/// ```no_run
/// use seasonplan_shared::models::user::{CreateUser, User};
/// use seasonplan_shared::auth::password::hash_password;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     password_hash: hash_password("secret123")?,
/// }).await?;
///
/// let verified = User::verify_credentials(&pool, "alice", "secret123").await?;
/// assert_eq!(verified.map(|u| u.id), Some(user.id));
/// # Ok(())
/// # }
/// ```
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::error::{PlannerError, PlannerResult};

/// User model representing an account
///
/// Usernames are unique and immutable after creation. Passwords are stored
/// as Argon2id hashes in PHC string format.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Unique login name
    pub username: String,

    /// Argon2id password hash (never the plaintext)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Login name (must be unique)
    pub username: String,

    /// Argon2id password hash (NOT the plaintext password)
    pub password_hash: String,
}

impl User {
    /// Creates a new user account
    ///
    /// # Errors
    ///
    /// - `DuplicateUsername` if the username is already taken
    /// - `Store` on other database failures
    pub async fn create(pool: &PgPool, data: CreateUser) -> PlannerResult<Self> {
        let result = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(data.username)
        .bind(data.password_hash)
        .fetch_one(pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) if is_unique_violation(&e) => Err(PlannerError::DuplicateUsername),
            Err(e) => Err(e.into()),
        }
    }

    /// Finds a user by username
    pub async fn find_by_username(pool: &PgPool, username: &str) -> PlannerResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Verifies a username/password pair
    ///
    /// Returns the matching user when both the username exists and the
    /// password matches the stored hash; `None` otherwise. The two miss
    /// cases are indistinguishable to the caller, so login responses never
    /// confirm whether a username is registered.
    pub async fn verify_credentials(
        pool: &PgPool,
        username: &str,
        plaintext: &str,
    ) -> PlannerResult<Option<Self>> {
        let Some(user) = Self::find_by_username(pool, username).await? else {
            return Ok(None);
        };

        if password::verify_password(plaintext, &user.password_hash)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Deletes a user account
    ///
    /// All of the user's tasks are removed by the ON DELETE CASCADE on
    /// `tasks.owner_id`. Not exposed over HTTP; used by test cleanup.
    pub async fn delete(pool: &PgPool, id: Uuid) -> PlannerResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

/// Checks whether a sqlx error is a unique-constraint violation
///
/// Postgres reports these with SQLSTATE 23505.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("23505"),
        _ => false,
    }
}

/// Database models for seasonplan
///
/// This module contains the persisted entities and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts (the credential store)
/// - `task`: Category-tagged to-do items owned by users
///
/// # Example
///
/// ```no_run
/// use seasonplan_shared::models::task::{Category, CreateTask, Task};
/// use seasonplan_shared::models::user::{CreateUser, User};
/// use seasonplan_shared::auth::password::hash_password;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let user = User::create(&pool, CreateUser {
///     username: "alice".to_string(),
///     password_hash: hash_password("secret123")?,
/// }).await?;
///
/// let task = Task::create(&pool, CreateTask {
///     owner_id: user.id,
///     content: "Plant seeds".to_string(),
///     category: Category::Spring,
/// }).await?;
/// # Ok(())
/// # }
/// ```

pub mod task;
pub mod user;

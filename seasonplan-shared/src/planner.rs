/// Planner use-case service
///
/// The orchestration layer sitting between the HTTP surface and the stores.
/// Every operation first resolves the caller's session through the session
/// gate, then delegates to the task store or credential store, translating
/// domain outcomes into the shared failure taxonomy.
///
/// The service is constructed with its dependencies (pool + session store)
/// and cloned into handlers; nothing here is ambient global state.
///
/// # Example
///
/// ```no_run
/// use seasonplan_shared::auth::session::SessionStore;
/// use seasonplan_shared::planner::PlannerService;
///
/// # async fn example(pool: sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// let planner = PlannerService::new(pool, SessionStore::new());
///
/// let user_id = planner.register("alice", "secret123", "secret123").await?;
/// let session = planner.login("alice", "secret123").await?;
/// let task_id = planner.add_task(&session.token, "Plant seeds", "spring").await?;
/// # let _ = (user_id, task_id);
/// # Ok(())
/// # }
/// ```
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::auth::session::{SessionIdentity, SessionStore};
use crate::error::{PlannerError, PlannerResult};
use crate::export;
use crate::models::task::{Category, CreateTask, Task};
use crate::models::user::{CreateUser, User};

/// Outcome of a successful login
#[derive(Debug, Clone)]
pub struct LoginSession {
    /// Opaque session token
    pub token: String,

    /// Authenticated user ID
    pub user_id: Uuid,

    /// Username for display
    pub username: String,
}

/// Use-case layer composing the session gate, credential store and task store
#[derive(Clone)]
pub struct PlannerService {
    db: PgPool,
    sessions: SessionStore,
}

impl PlannerService {
    /// Creates a planner service over a database pool and session store
    pub fn new(db: PgPool, sessions: SessionStore) -> Self {
        Self { db, sessions }
    }

    /// The session store, for entry points that need direct access
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Registers a new account
    ///
    /// Does not auto-login: the caller proceeds to the login form.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when username or password is empty
    /// - `PasswordMismatch` when the confirmation differs
    /// - `DuplicateUsername` when the name is taken
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        password_confirm: &str,
    ) -> PlannerResult<Uuid> {
        if username.trim().is_empty() {
            return Err(PlannerError::InvalidInput("username is required".into()));
        }
        if password.is_empty() {
            return Err(PlannerError::InvalidInput("password is required".into()));
        }
        if password != password_confirm {
            return Err(PlannerError::PasswordMismatch);
        }

        let password_hash = password::hash_password(password)?;

        let user = User::create(
            &self.db,
            CreateUser {
                username: username.to_string(),
                password_hash,
            },
        )
        .await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user.id)
    }

    /// Logs a user in, starting a new session
    ///
    /// # Errors
    ///
    /// - `InvalidInput` when username or password is empty
    /// - `InvalidCredentials` on unknown username or wrong password
    ///   (indistinguishable by design)
    pub async fn login(&self, username: &str, password: &str) -> PlannerResult<LoginSession> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(PlannerError::InvalidInput(
                "username and password are required".into(),
            ));
        }

        let user = User::verify_credentials(&self.db, username, password)
            .await?
            .ok_or(PlannerError::InvalidCredentials)?;

        let token = self.sessions.start(user.id, user.username.clone());
        tracing::info!(user_id = %user.id, "Login successful");
        Ok(LoginSession {
            token,
            user_id: user.id,
            username: user.username,
        })
    }

    /// Ends a session; unknown tokens are a no-op
    pub fn logout(&self, token: &str) {
        self.sessions.end(token);
    }

    /// Lists the caller's tasks grouped into the fixed category buckets
    ///
    /// Every category appears in store order, empty buckets included, so
    /// the presentation layer renders a stable five-section board.
    pub async fn list_tasks(&self, token: &str) -> PlannerResult<Vec<(Category, Vec<Task>)>> {
        let identity = self.require_session(token)?;
        let tasks = Task::list_by_owner(&self.db, identity.user_id).await?;
        Ok(group_by_category(tasks))
    }

    /// Adds a task for the caller
    ///
    /// Unrecognized category input is coerced to `general`.
    pub async fn add_task(
        &self,
        token: &str,
        content: &str,
        category: &str,
    ) -> PlannerResult<Uuid> {
        let identity = self.require_session(token)?;

        let task = Task::create(
            &self.db,
            CreateTask {
                owner_id: identity.user_id,
                content: content.to_string(),
                category: Category::parse_or_general(category),
            },
        )
        .await?;

        tracing::info!(task_id = %task.id, user_id = %identity.user_id, "Task added");
        Ok(task.id)
    }

    /// Flips a task's completion state, returning the updated task
    pub async fn toggle_task(&self, token: &str, task_id: Uuid) -> PlannerResult<Task> {
        let identity = self.require_session(token)?;
        let task = Task::toggle_completed(&self.db, task_id, identity.user_id).await?;

        tracing::info!(
            task_id = %task.id,
            is_completed = task.is_completed,
            "Task toggled"
        );
        Ok(task)
    }

    /// Replaces a task's content and category
    ///
    /// Unrecognized category input keeps the task's current category (the
    /// edit-path fallback differs from add's coercion to `general`).
    pub async fn edit_task(
        &self,
        token: &str,
        task_id: Uuid,
        content: &str,
        category: &str,
    ) -> PlannerResult<Task> {
        let identity = self.require_session(token)?;

        let task = Task::update_content(
            &self.db,
            task_id,
            identity.user_id,
            content,
            Category::parse(category),
        )
        .await?;

        tracing::info!(task_id = %task.id, "Task updated");
        Ok(task)
    }

    /// Deletes a task permanently
    pub async fn delete_task(&self, token: &str, task_id: Uuid) -> PlannerResult<()> {
        let identity = self.require_session(token)?;
        Task::delete(&self.db, task_id, identity.user_id).await?;

        tracing::info!(task_id = %task_id, user_id = %identity.user_id, "Task deleted");
        Ok(())
    }

    /// Renders the caller's tasks as a shareable plain-text report
    ///
    /// # Errors
    ///
    /// `NothingToExport` when the user has zero tasks.
    pub async fn export_tasks(&self, token: &str) -> PlannerResult<String> {
        let identity = self.require_session(token)?;

        let tasks = Task::list_by_owner(&self.db, identity.user_id).await?;
        if tasks.is_empty() {
            return Err(PlannerError::NothingToExport);
        }

        Ok(export::render_report(&identity.username, &tasks))
    }

    /// Resolves the session or fails with `Unauthenticated`
    ///
    /// The explicit guard at the top of every use case; callers map the
    /// failure to "redirect to login".
    fn require_session(&self, token: &str) -> PlannerResult<SessionIdentity> {
        self.sessions
            .resolve(token)
            .ok_or(PlannerError::Unauthenticated)
    }
}

/// Buckets a store-ordered task list into the fixed category sequence
///
/// The input order within each category is preserved (newest first, as the
/// store returns it). All five buckets are present in the output.
pub fn group_by_category(tasks: Vec<Task>) -> Vec<(Category, Vec<Task>)> {
    let mut buckets: Vec<(Category, Vec<Task>)> =
        Category::ALL.iter().map(|c| (*c, Vec::new())).collect();

    for task in tasks {
        // Category::ALL covers every enum value, so the lookup always hits
        if let Some((_, bucket)) = buckets.iter_mut().find(|(c, _)| *c == task.category) {
            bucket.push(task);
        }
    }

    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(content: &str, category: Category) -> Task {
        Task {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            content: content.to_string(),
            category,
            is_completed: false,
            created_at: Utc::now(),
        }
    }

    /// Pool that never connects; operations behind the session guard fail
    /// before any query is issued.
    fn lazy_pool() -> PgPool {
        sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgresql://localhost/unreachable")
            .expect("lazy pool")
    }

    #[test]
    fn test_group_by_category_keeps_bucket_order() {
        let grouped = group_by_category(vec![
            task("c", Category::General),
            task("a", Category::Spring),
        ]);

        let categories: Vec<Category> = grouped.iter().map(|(c, _)| *c).collect();
        assert_eq!(categories, Category::ALL.to_vec());

        assert_eq!(grouped[0].1.len(), 1); // spring
        assert_eq!(grouped[4].1.len(), 1); // general
        assert!(grouped[1].1.is_empty()); // summer
    }

    #[test]
    fn test_group_by_category_preserves_input_order_within_bucket() {
        let grouped = group_by_category(vec![
            task("newest", Category::Summer),
            task("older", Category::Summer),
        ]);

        let summer = &grouped[1].1;
        assert_eq!(summer[0].content, "newest");
        assert_eq!(summer[1].content, "older");
    }

    #[tokio::test]
    async fn test_task_operations_require_session() {
        let planner = PlannerService::new(lazy_pool(), SessionStore::new());

        let err = planner.list_tasks("stale-token").await.unwrap_err();
        assert!(matches!(err, PlannerError::Unauthenticated));

        let err = planner.add_task("stale-token", "x", "general").await.unwrap_err();
        assert!(matches!(err, PlannerError::Unauthenticated));

        let err = planner.export_tasks("stale-token").await.unwrap_err();
        assert!(matches!(err, PlannerError::Unauthenticated));

        let err = planner
            .delete_task("stale-token", Uuid::new_v4())
            .await
            .unwrap_err();
        assert!(matches!(err, PlannerError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_register_validates_before_touching_store() {
        let planner = PlannerService::new(lazy_pool(), SessionStore::new());

        let err = planner.register("", "pw", "pw").await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));

        let err = planner.register("alice", "", "").await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));

        let err = planner.register("alice", "pw", "other").await.unwrap_err();
        assert!(matches!(err, PlannerError::PasswordMismatch));
    }

    #[tokio::test]
    async fn test_login_validates_before_touching_store() {
        let planner = PlannerService::new(lazy_pool(), SessionStore::new());

        let err = planner.login("", "pw").await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));

        let err = planner.login("alice", "").await.unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_logout_unknown_token_is_noop() {
        let planner = PlannerService::new(lazy_pool(), SessionStore::new());
        planner.logout("never-existed");
        assert!(planner.sessions().is_empty());
    }
}

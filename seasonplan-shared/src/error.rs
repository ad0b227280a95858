/// Common error taxonomy for the planner core
///
/// Every fallible operation in the credential store, session gate, task
/// store and planner service returns `Result<T, PlannerError>`. The API
/// crate maps these variants onto HTTP responses; the variants themselves
/// carry no presentation concerns.
///
/// # Example
///
/// ```
/// use seasonplan_shared::error::PlannerError;
///
/// fn check(content: &str) -> Result<(), PlannerError> {
///     if content.trim().is_empty() {
///         return Err(PlannerError::EmptyContent);
///     }
///     Ok(())
/// }
///
/// assert!(matches!(check("   "), Err(PlannerError::EmptyContent)));
/// ```
use thiserror::Error;

/// Result alias used throughout the shared crate
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Unified failure kinds for the planner core
#[derive(Debug, Error)]
pub enum PlannerError {
    /// A required field is missing or malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Password and confirmation do not match on registration
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The requested username is already taken
    #[error("Username already taken")]
    DuplicateUsername,

    /// Unknown username or wrong password (deliberately indistinct)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// No valid session for the supplied token
    #[error("Not authenticated")]
    Unauthenticated,

    /// No task with the requested id
    #[error("Task not found")]
    NotFound,

    /// The task exists but belongs to another user
    #[error("Task belongs to another user")]
    Forbidden,

    /// Task content is blank
    #[error("Task content must not be empty")]
    EmptyContent,

    /// Export requested while the user has zero tasks
    #[error("No tasks to export")]
    NothingToExport,

    /// Underlying persistence failure; the statement rolled back
    #[error("Store unavailable: {0}")]
    Store(#[from] sqlx::Error),

    /// Password hashing backend failure (not a wrong password)
    #[error("Password operation failed: {0}")]
    Password(#[from] crate::auth::password::PasswordError),
}

impl PlannerError {
    /// True for the validation kinds that the presentation layer recovers
    /// by redisplaying the originating form
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PlannerError::InvalidInput(_)
                | PlannerError::PasswordMismatch
                | PlannerError::EmptyContent
        )
    }

    /// True for the ownership kinds that are collapsed into one generic
    /// "access denied" message before reaching the user
    pub fn is_access_denied(&self) -> bool {
        matches!(self, PlannerError::NotFound | PlannerError::Forbidden)
    }
}

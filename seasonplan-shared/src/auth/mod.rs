/// Authentication utilities
///
/// This module provides the authentication primitives for seasonplan:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`session`]: In-process session store mapping opaque tokens to users
///
/// # Example
///
/// ```
/// use seasonplan_shared::auth::password::{hash_password, verify_password};
/// use seasonplan_shared::auth::session::SessionStore;
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secret123")?;
/// assert!(verify_password("secret123", &hash)?);
///
/// let sessions = SessionStore::new();
/// let token = sessions.start(Uuid::new_v4(), "alice".to_string());
/// assert!(sessions.resolve(&token).is_some());
/// # Ok(())
/// # }
/// ```

pub mod password;
pub mod session;

//! Credential store.
//!
//! In-memory list of registered users. Records are created on signup and
//! never mutated or deleted; email uniqueness is enforced under the same
//! write lock as the insert.

use tokio::sync::RwLock;

use super::StoreError;
use crate::models::user::User;

/// In-memory user repository keyed by email (exact, case-sensitive match).
#[derive(Debug, Default)]
pub struct UserStore {
    users: RwLock<Vec<User>>,
}

impl UserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user.
    ///
    /// The duplicate check and the append happen under one write lock, so
    /// two concurrent signups for the same email cannot both succeed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a user with the same email exists.
    pub async fn insert(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(format!(
                "email {} already exists",
                user.email
            )));
        }
        users.push(user.clone());
        Ok(user)
    }

    /// Look up a user by exact email match.
    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let users = self.users.read().await;
        users.iter().find(|u| u.email == email).cloned()
    }

    /// Number of registered users.
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }
}

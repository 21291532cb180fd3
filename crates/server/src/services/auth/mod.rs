//! Authentication service.
//!
//! Signup and login over the in-memory credential store. Passwords are
//! hashed with bcrypt at cost 10; the plaintext is never stored and never
//! written to the security log.

mod error;

pub use error::AuthError;

use crate::models::user::User;
use crate::seclog::SecurityLog;
use crate::store::{StoreError, UserStore};

/// bcrypt work factor for password hashing.
const HASH_COST: u32 = 10;

/// Authentication service.
///
/// Borrows the credential store and security log from [`crate::state::AppState`];
/// construct one per operation.
pub struct AuthService<'a> {
    users: &'a UserStore,
    seclog: &'a SecurityLog,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(users: &'a UserStore, seclog: &'a SecurityLog) -> Self {
        Self { users, seclog }
    }

    /// Register a new user with email, password, and display name.
    ///
    /// Every attempt - success or failure - emits one security log entry
    /// naming the email (never the password).
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingFields` if any field is empty.
    /// Returns `AuthError::DuplicateEmail` if the email is already registered.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn signup(&self, email: &str, password: &str, name: &str) -> Result<User, AuthError> {
        if email.is_empty() || password.is_empty() || name.is_empty() {
            self.seclog
                .record("Signup validation failure: Missing required fields");
            return Err(AuthError::MissingFields);
        }

        let password_hash = hash_password(password)?;
        let user = User {
            email: email.to_string(),
            password_hash,
            name: name.to_string(),
        };

        match self.users.insert(user).await {
            Ok(user) => {
                self.seclog.record(format!("User signed up: {}", user.email));
                Ok(user)
            }
            Err(StoreError::Conflict(_)) => {
                self.seclog
                    .record(format!("Signup failure: Email {email} already exists"));
                Err(AuthError::DuplicateEmail)
            }
        }
    }

    /// Verify a login attempt.
    ///
    /// Fails uniformly for an unknown email and a wrong password, and logs
    /// one entry either way.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    /// Returns `AuthError::PasswordHash` if the stored hash is unreadable.
    pub async fn verify(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = self.users.find_by_email(email).await;

        let matches = match &user {
            Some(user) => verify_password(password, &user.password_hash)?,
            None => false,
        };

        match (user, matches) {
            (Some(user), true) => {
                self.seclog.record(format!("User logged in: {}", user.email));
                Ok(user)
            }
            _ => {
                self.seclog
                    .record(format!("Login failure: Invalid credentials for {email}"));
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

/// Hash a password with bcrypt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, HASH_COST).map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored bcrypt hash.
fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|_| AuthError::PasswordHash)
}

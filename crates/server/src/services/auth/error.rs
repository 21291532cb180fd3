//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required field was empty or absent.
    #[error("all fields are required")]
    MissingFields,

    /// Signup email collision.
    #[error("email already exists")]
    DuplicateEmail,

    /// Invalid credentials. Deliberately the same for an unknown email and
    /// a wrong password, so callers cannot enumerate users.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Password hashing or verification failed internally.
    #[error("password hashing error")]
    PasswordHash,
}

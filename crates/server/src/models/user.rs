//! User domain type.

/// A registered user.
///
/// Created on signup and never mutated or deleted. The email is the unique
/// key; the password is stored only as a bcrypt hash.
#[derive(Debug, Clone)]
pub struct User {
    /// Email address (unique, exact-match key).
    pub email: String,
    /// bcrypt hash of the password. Never the plaintext.
    pub password_hash: String,
    /// Display name.
    pub name: String,
}

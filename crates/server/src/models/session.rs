//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

/// Session-stored user identity.
///
/// Minimal data stored in the session to identify the logged-in user.
/// The password hash never goes anywhere near the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's email address.
    pub email: String,
    /// User's display name.
    pub name: String,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

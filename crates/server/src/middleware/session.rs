//! Session middleware configuration.
//!
//! Sets up in-memory cookie sessions using tower-sessions. Session state
//! lives only in this process and is lost on restart, matching the rest
//! of the application's storage model.

use secrecy::ExposeSecret;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::ServerConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "minicrm_session";

/// Create the session layer with an in-memory store and signed cookies.
///
/// The cookie expires with the browser session; the only other way a
/// session ends is the explicit logout route. The signing key is derived
/// from the configured secret, which the config loader has already
/// validated (min length, no placeholder values).
#[must_use]
pub fn create_session_layer(config: &ServerConfig) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    // Key::derive_from requires >= 32 bytes; ServerConfig enforces that
    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(is_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}

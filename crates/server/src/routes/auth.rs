//! Authentication route handlers.
//!
//! Handles signup, login, and logout. Signup does not authenticate - the
//! new user is redirected to the login form.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CurrentUser, session_keys};
use crate::state::AppState;

// =============================================================================
// Form Types
// =============================================================================

/// Signup form data.
///
/// Fields default to empty rather than rejecting the request at
/// deserialization, so a missing field gets the application's own
/// validation response instead of a generic 422.
#[derive(Debug, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
}

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate;

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
pub async fn signup_page() -> impl IntoResponse {
    SignupTemplate
}

/// Handle signup form submission.
///
/// On success the user is redirected to the login page - signup does not
/// establish a session.
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    state
        .auth()
        .signup(&form.email, &form.password, &form.name)
        .await?;
    Ok(Redirect::to("/login"))
}

// =============================================================================
// Login / Logout Routes
// =============================================================================

/// Display the login page.
pub async fn login_page() -> impl IntoResponse {
    LoginTemplate
}

/// Handle login form submission.
///
/// Verifies credentials and stores the user's identity in the session.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let user = state.auth().verify(&form.email, &form.password).await?;

    let current_user = CurrentUser {
        email: user.email,
        name: user.name,
    };
    if let Err(e) = set_current_user(&session, &current_user).await {
        tracing::error!("Failed to set session: {e}");
        return Err(AppError::Internal("failed to establish session".to_string()));
    }

    Ok(Redirect::to("/dashboard").into_response())
}

/// Handle logout.
///
/// Clears the identity and destroys the session. Logging out without a
/// session is a no-op redirect.
pub async fn logout(State(state): State<AppState>, session: Session) -> Redirect {
    if let Ok(Some(user)) = session
        .get::<CurrentUser>(session_keys::CURRENT_USER)
        .await
    {
        state
            .seclog()
            .record(format!("User logged out: {}", user.email));
    }

    if let Err(e) = clear_current_user(&session).await {
        tracing::error!("Failed to clear session: {e}");
    }

    // Also destroy the entire session
    if let Err(e) = session.flush().await {
        tracing::error!("Failed to flush session: {e}");
    }

    Redirect::to("/")
}

//! HTTP route handlers for the server.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Landing page
//! GET  /health                 - Health check
//!
//! # Auth
//! GET  /signup                 - Signup form
//! POST /signup                 - Signup action (redirects to /login)
//! GET  /login                  - Login form
//! POST /login                  - Login action (redirects to /dashboard)
//! POST /logout                 - Logout action (redirects to /)
//!
//! # Customers (requires session)
//! GET  /dashboard              - Dashboard with customer list
//! POST /customer               - Create customer (redirects to /dashboard)
//!
//! # Audit (requires session)
//! GET  /logs                   - Parsed security log entries
//! ```
//!
//! Protected GET routes redirect anonymous requests to `/login`;
//! protected non-GET routes answer 401. See `middleware::auth`.

pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod home;
pub mod logs;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the server.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Public pages
        .route("/", get(home::index))
        .route("/signup", get(auth::signup_page).post(auth::signup))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Protected pages
        .route("/dashboard", get(dashboard::show))
        .route("/customer", post(customers::create))
        .route("/logs", get(logs::show))
}

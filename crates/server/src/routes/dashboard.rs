//! Dashboard page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use minicrm_core::Customer;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub user: CurrentUser,
    pub customers: Vec<Customer>,
}

/// Display the dashboard with the customer list and creation form.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> impl IntoResponse {
    let customers = state.customers().list_all().await;
    DashboardTemplate { user, customers }
}

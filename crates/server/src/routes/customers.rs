//! Customer creation handler.

use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Customer creation form data.
#[derive(Debug, Deserialize)]
pub struct CustomerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Handle customer creation.
///
/// Requires an active session (anonymous POSTs get 401 from the
/// extractor). Success embeds the full serialized record in the security
/// log entry.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect> {
    if form.name.is_empty() || form.email.is_empty() {
        state
            .seclog()
            .record("Customer creation failed: Missing required fields");
        return Err(AppError::BadRequest("Name and email are required".to_string()));
    }

    let customer = state.customers().create(form.name, form.email).await;

    match serde_json::to_string(&customer) {
        Ok(json) => state.seclog().record(format!("Customer created: {json}")),
        Err(e) => tracing::error!("Failed to serialize customer for security log: {e}"),
    }

    Ok(Redirect::to("/dashboard"))
}

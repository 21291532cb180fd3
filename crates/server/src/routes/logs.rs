//! Security log page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use minicrm_core::SecurityLogEntry;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Security log page template.
#[derive(Template, WebTemplate)]
#[template(path = "logs.html")]
pub struct LogsTemplate {
    pub entries: Vec<SecurityLogEntry>,
}

/// Display the parsed security log.
///
/// Entries still queued on the writer task may not appear yet; the page
/// reflects what is on disk at read time.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> Result<LogsTemplate> {
    let entries = state.seclog().read_entries().await?;
    Ok(LogsTemplate { entries })
}

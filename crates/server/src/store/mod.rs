//! In-memory data stores.
//!
//! All application data is process-local and lost on restart - there is
//! deliberately no database behind these repositories. Each store owns its
//! collection behind a `tokio::sync::RwLock` and is handed to handlers
//! through [`crate::state::AppState`], so tests can build isolated
//! instances without process-wide state.
//!
//! ## Stores
//!
//! - [`users::UserStore`] - credential store, keyed by email
//! - [`customers::CustomerRegistry`] - customer records with 1-based ids

pub mod customers;
pub mod users;

pub use customers::CustomerRegistry;
pub use users::UserStore;

use thiserror::Error;

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint was violated.
    #[error("conflict: {0}")]
    Conflict(String),
}

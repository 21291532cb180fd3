//! Minicrm Core - Shared types library.
//!
//! This crate provides common types used across all minicrm components:
//! - `server` - Web application binary
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP, no file access.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs and the customer / security-log record types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

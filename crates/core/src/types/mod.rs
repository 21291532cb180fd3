//! Core types for minicrm.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod id;
pub mod log;

pub use customer::Customer;
pub use id::*;
pub use log::SecurityLogEntry;

//! Customer record type.

use serde::{Deserialize, Serialize};

use crate::CustomerId;

/// A customer record.
///
/// Created by authenticated users and held in memory for the lifetime of
/// the process. Records are never mutated or deleted; ids are assigned
/// 1-based in insertion order.
///
/// There is deliberately no uniqueness constraint on `email` - the same
/// contact may appear more than once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    /// Unique, strictly increasing id (1-based).
    pub id: CustomerId,
    /// Customer display name.
    pub name: String,
    /// Customer contact email.
    pub email: String,
}

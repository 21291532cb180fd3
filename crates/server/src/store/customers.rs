//! Customer registry.
//!
//! In-memory list of customer records with 1-based, strictly increasing
//! ids. The id counter is read and advanced under the same write lock as
//! the append, so concurrent creates can never be assigned the same id.

use tokio::sync::RwLock;

use minicrm_core::{Customer, CustomerId};

/// In-memory customer repository.
#[derive(Debug, Default)]
pub struct CustomerRegistry {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    customers: Vec<Customer>,
    next_id: i32,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            customers: Vec::new(),
            next_id: 1,
        }
    }
}

impl CustomerRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a customer record and assign it the next id.
    pub async fn create(&self, name: String, email: String) -> Customer {
        let mut inner = self.inner.write().await;
        let customer = Customer {
            id: CustomerId::new(inner.next_id),
            name,
            email,
        };
        inner.next_id += 1;
        inner.customers.push(customer.clone());
        customer
    }

    /// All customers in insertion order.
    pub async fn list_all(&self) -> Vec<Customer> {
        self.inner.read().await.customers.clone()
    }

    /// Number of customer records.
    pub async fn count(&self) -> usize {
        self.inner.read().await.customers.len()
    }
}

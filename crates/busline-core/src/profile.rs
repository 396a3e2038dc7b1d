//! The persisted customer identity.

use std::sync::Arc;

use log::debug;

use crate::{
    models::CustomerInfo,
    store::{Persisted, StateStore, CUSTOMER_KEY},
};

/// Customer identity shared by every booking flow in the session.
///
/// The in-memory copy is authoritative; every change is written through to
/// the state store, and a failed write only costs persistence across
/// restarts.
#[derive(Clone)]
pub struct CustomerProfile {
    customer: CustomerInfo,
    persisted: Persisted<CustomerInfo>,
}

impl CustomerProfile {
    /// Load the stored identity, or start blank.
    pub async fn open(store: Arc<dyn StateStore>) -> Self {
        let persisted = Persisted::new(store, CUSTOMER_KEY);
        let customer: CustomerInfo = persisted.load_or_default().await;
        debug!("Loaded customer profile (complete: {})", customer.is_complete());

        Self {
            customer,
            persisted,
        }
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    /// Replace the identity; last value wins.
    pub async fn set_customer(&mut self, customer: CustomerInfo) {
        self.customer = customer;
        self.persisted.save_detached(&self.customer).await;
    }

    /// Forget the stored identity.
    pub async fn clear(&mut self) {
        self.set_customer(CustomerInfo::default()).await;
    }
}

//! Customer registry: the resource actor holding every known customer.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::ResourceActor;
use crate::clients::CustomerClient;
use crate::domain::Customer;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Customer actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Customer>, CustomerClient) {
    let customer_id_counter = Arc::new(AtomicU64::new(1));
    let next_customer_id = move || {
        let id = customer_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("customer_{}", id)
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_customer_id);
    (actor, CustomerClient::new(generic_client))
}

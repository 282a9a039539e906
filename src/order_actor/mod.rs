//! Order records. Orders are written once, after the pipeline in
//! [`crate::clients::OrderClient::create_order`] has validated them.

pub mod entity;
pub mod error;

pub use error::*;

use crate::actor_framework::ResourceActor;
use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::domain::Order;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Order actor and the orchestrating client on top of it.
pub fn new(
    buffer_size: usize,
    customer_client: CustomerClient,
    product_client: ProductClient,
) -> (ResourceActor<Order>, OrderClient) {
    let order_id_counter = Arc::new(AtomicU64::new(1));
    let next_order_id = move || {
        let id = order_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("order_{}", id)
    };

    let (actor, generic_client) = ResourceActor::new(buffer_size, next_order_id);
    (actor, OrderClient::new(generic_client, customer_client, product_client))
}

//! Typed handles over the generic [`ResourceClient`](crate::actor_framework::ResourceClient).

#[macro_use]
mod macros;
mod customer_client;
mod product_client;
mod order_client;

pub use customer_client::CustomerClient;
pub use product_client::ProductClient;
pub use order_client::OrderClient;

use thiserror::Error;
use crate::actor_framework::FrameworkError;

/// Errors that can occur while placing or reading orders.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Customer does not exist")]
    CustomerNotFound(String),
    #[error("Some products do not exist")]
    ProductsNotFound(String),
    #[error("Product with insufficient quantity")]
    InsufficientQuantity { product_id: String, requested: u32, available: u32 },
    /// Stock changed under every reservation attempt although each re-check passed.
    #[error("Product with insufficient quantity")]
    StockContention { attempts: u32 },
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Conflict(msg) | FrameworkError::Rejected(msg) => OrderError::ValidationError(msg),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

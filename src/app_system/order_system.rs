use tracing::{error, info, instrument};
use crate::app_system::{SystemConfig, SystemError};
use crate::clients::{CustomerClient, OrderClient, ProductClient};
use crate::{customer_actor, order_actor, product_actor};

/// The main application system that orchestrates all actors.
///
/// Responsible for starting up actors, wiring them together, and handling shutdown.
pub struct OrderSystem {
    pub order_client: OrderClient,
    pub customer_client: CustomerClient,
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl OrderSystem {
    /// Starts the customer and product actors, then the order actor wired to
    /// their clients. Must be called from inside a tokio runtime.
    #[instrument(name = "order_system", skip(config), fields(channel_buffer = config.channel_buffer))]
    pub fn new(config: &SystemConfig) -> Self {
        info!("Starting order system");

        let (customer_service, customer_client) = customer_actor::new(config.channel_buffer);
        let customer_handle = tokio::spawn(customer_service.run());

        let (product_service, product_client) = product_actor::new(config.channel_buffer);
        let product_handle = tokio::spawn(product_service.run());

        let (order_service, order_client) = order_actor::new(
            config.channel_buffer,
            customer_client.clone(),
            product_client.clone(),
        );
        let order_handle = tokio::spawn(order_service.run());

        info!("Order system started successfully");

        Self {
            order_client,
            customer_client,
            product_client,
            handles: vec![customer_handle, product_handle, order_handle],
        }
    }

    /// Drops every client, which closes the actor channels, then waits for the
    /// actor tasks. Clones held elsewhere keep their actor alive until dropped.
    #[instrument(skip(self))]
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down order system");

        drop(self.order_client);
        drop(self.customer_client);
        drop(self.product_client);

        let mut failure = None;
        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                failure.get_or_insert(SystemError::TaskFailed(e.to_string()));
            }
        }

        match failure {
            Some(e) => Err(e),
            None => {
                info!("Order system shutdown complete");
                Ok(())
            }
        }
    }
}

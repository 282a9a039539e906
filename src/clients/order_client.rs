use tracing::{error, info, instrument, warn};
use crate::actor_framework::ResourceClient;
use crate::clients::{CustomerClient, ProductClient};
use crate::domain::{
    merge_product_quantities, CreateOrderRequest, Order, OrderCreate, OrderProduct, Product,
    ProductQuantity,
};
use crate::order_actor::OrderError;
use crate::product_actor::ProductError;

/// Client for interacting with the Order actor.
///
/// Placing an order is orchestrated here: the customer and product actors are
/// consulted before the order record is written.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
    customer_client: CustomerClient,
    product_client: ProductClient,
}

impl_client_methods!(OrderClient, Order, OrderError, order);

/// Matches merged request lines against the stored products and prices them.
///
/// Lines are checked in order and the first failure is returned.
fn build_order_products(
    requested: &[ProductQuantity],
    stored: &[Product],
) -> Result<Vec<OrderProduct>, OrderError> {
    requested
        .iter()
        .map(|line| {
            let product = stored
                .iter()
                .find(|product| product.id == line.id)
                .ok_or_else(|| OrderError::ProductsNotFound(line.id.clone()))?;

            if line.quantity > product.quantity {
                return Err(OrderError::InsufficientQuantity {
                    product_id: line.id.clone(),
                    requested: line.quantity,
                    available: product.quantity,
                });
            }

            Ok(OrderProduct {
                product_id: line.id.clone(),
                price: product.price,
                quantity: line.quantity,
            })
        })
        .collect()
}

/// Batch decrements sent before giving up on a contended reservation.
const RESERVATION_ATTEMPTS: u32 = 2;

fn communication_error(e: impl std::fmt::Display) -> OrderError {
    OrderError::ActorCommunicationError(e.to_string())
}

impl OrderClient {
    pub fn new(
        inner: ResourceClient<Order>,
        customer_client: CustomerClient,
        product_client: ProductClient,
    ) -> Self {
        Self {
            inner,
            customer_client,
            product_client,
        }
    }

    /// Places an order: validates the customer, merges repeated products,
    /// checks stock, decrements it and stores the order.
    ///
    /// Nothing is stored and no stock is taken when any step before the order
    /// write fails.
    #[instrument(
        skip(self, request),
        fields(customer_id = %request.customer_id, lines = request.products.len())
    )]
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<Order, OrderError> {
        info!("Processing create_order request");

        // Step 1: Validate customer
        let customer = match self.customer_client.get_customer(request.customer_id.clone()).await {
            Ok(Some(customer)) => {
                info!(customer_name = %customer.name, "Customer validation successful");
                customer
            }
            Ok(None) => {
                error!("Customer not found");
                return Err(OrderError::CustomerNotFound(request.customer_id));
            }
            Err(e) => {
                error!(error = %e, "Customer validation failed");
                return Err(communication_error(e));
            }
        };

        // Step 2: Reject requests that cannot form an order
        if request.products.is_empty() {
            error!("Order has no products");
            return Err(OrderError::ValidationError("Order must contain at least one product".to_string()));
        }
        if let Some(line) = request.products.iter().find(|line| line.quantity == 0) {
            error!(product_id = %line.id, "Zero quantity requested");
            return Err(OrderError::ValidationError(format!("Quantity for product {} must be positive", line.id)));
        }

        // Step 3: Merge repeated products
        let merged = merge_product_quantities(&request.products)
            .map_err(|e| OrderError::ValidationError(e.to_string()))?;

        // Step 4: Check existence and stock, price each line
        let products = self.price_lines(&merged).await?;
        info!(distinct_products = products.len(), "Stock check passed");

        // Step 5: Decrement stock
        let products = self.reserve(&merged, products).await?;

        // Step 6: Store the order
        let order_id = match self.inner.create(OrderCreate { customer, products }).await {
            Ok(order_id) => order_id,
            Err(e) => {
                error!(error = %e, "Order write failed");
                self.release_stock(&merged).await;
                return Err(OrderError::from(e));
            }
        };

        // Step 7: Read the stored order back. It stays committed from here on.
        let order = self.inner
            .get(order_id.clone())
            .await
            .map_err(OrderError::from)?
            .ok_or(OrderError::NotFound(order_id))?;

        info!(order_id = %order.id, total = order.total(), "Order created successfully");
        Ok(order)
    }

    async fn price_lines(&self, merged: &[ProductQuantity]) -> Result<Vec<OrderProduct>, OrderError> {
        let ids = merged.iter().map(|line| line.id.clone()).collect();
        let stored = self.product_client.find_all_by_id(ids).await.map_err(communication_error)?;

        build_order_products(merged, &stored).inspect_err(|e| error!(error = %e, "Stock check failed"))
    }

    /// Takes the stock for every merged line in one batch.
    ///
    /// A refused batch means stock moved since the check. The check is run
    /// again: a real shortage comes back as its usual error, otherwise the
    /// batch is sent again with the freshly priced lines.
    async fn reserve(
        &self,
        merged: &[ProductQuantity],
        mut products: Vec<OrderProduct>,
    ) -> Result<Vec<OrderProduct>, OrderError> {
        for attempt in 1..=RESERVATION_ATTEMPTS {
            match self.product_client.update_quantity(merged).await {
                Ok(_) => {
                    info!(attempt, "Stock reserved successfully");
                    return Ok(products);
                }
                Err(e @ (ProductError::StockRejected(_) | ProductError::NotFound(_))) => {
                    warn!(attempt, error = %e, "Stock reservation refused");
                    products = self.price_lines(merged).await?;
                }
                Err(e) => {
                    error!(error = %e, "Stock reservation failed");
                    return Err(communication_error(e));
                }
            }
        }

        error!(attempts = RESERVATION_ATTEMPTS, "Stock kept changing during reservation");
        Err(OrderError::StockContention { attempts: RESERVATION_ATTEMPTS })
    }

    async fn release_stock(&self, merged: &[ProductQuantity]) {
        match self.product_client.restock(merged).await {
            Ok(_) => warn!("Order not stored, reserved stock released"),
            Err(e) => error!(error = %e, "Order not stored and stock could not be released"),
        }
    }
}

mod domain;
mod clients;

mod app_system;

#[cfg(test)]
mod mock_framework;
#[cfg(test)]
mod integration_tests;

mod actor_framework;
mod customer_actor;
mod product_actor;
mod order_actor;

use tracing::{error, info, Instrument};
use crate::app_system::{setup_tracing, OrderSystem, SystemConfig};
use crate::domain::{CreateOrderRequest, CustomerCreate, ProductCreate, ProductQuantity};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SystemConfig::from_env()?;
    setup_tracing(&config)?;

    info!("Starting storefront order desk");

    let system = OrderSystem::new(&config);

    let span = tracing::info_span!("catalog_setup");
    let (customer_id, lamp_id, chair_id) = async {
        info!("Registering customer and products");
        let customer_id = system.customer_client
            .create_customer(CustomerCreate { name: "Alice".into(), email: "alice@example.com".into() })
            .await?;
        let lamp_id = system.product_client
            .create_product(ProductCreate { name: "Desk Lamp".into(), price: 39.9, quantity: 10 })
            .await?;
        let chair_id = system.product_client
            .create_product(ProductCreate { name: "Office Chair".into(), price: 189.0, quantity: 2 })
            .await?;
        Ok::<_, Box<dyn std::error::Error>>((customer_id, lamp_id, chair_id))
    }
    .instrument(span)
    .await?;

    // Same shape a front end would post; the lamp is listed twice on purpose.
    let body = serde_json::json!({
        "customer_id": customer_id,
        "products": [
            { "id": lamp_id, "quantity": 2 },
            { "id": chair_id, "quantity": 1 },
            { "id": lamp_id, "quantity": 1 },
        ]
    });
    let request: CreateOrderRequest = serde_json::from_value(body)?;

    let span = tracing::info_span!("order_processing");
    let order_result = system.order_client.create_order(request).instrument(span).await;

    match order_result {
        Ok(order) => info!(order = %serde_json::to_string(&order)?, "Order processed successfully"),
        Err(e) => error!(error = %e, "Order processing failed"),
    }

    // Only one chair is left, so this one is refused and no stock moves.
    let greedy = CreateOrderRequest {
        customer_id,
        products: vec![ProductQuantity::new(lamp_id.clone(), 1), ProductQuantity::new(chair_id, 5)],
    };
    let span = tracing::info_span!("order_processing");
    if let Err(e) = system.order_client.create_order(greedy).instrument(span).await {
        error!(error = %e, "Order processing failed");
    }

    let lamps_left = system.product_client.check_stock(lamp_id).await?;
    info!(lamps_left, "Inventory after orders");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}

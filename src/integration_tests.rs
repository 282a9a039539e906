#[cfg(test)]
mod tests {
    use std::time::SystemTime;
    use tokio::sync::mpsc;
    use crate::actor_framework::{FrameworkError, ResourceRequest};
    use crate::clients::{CustomerClient, OrderClient, ProductClient};
    use crate::domain::{CreateOrderRequest, Customer, Order, Product, ProductQuantity};
    use crate::mock_framework::{create_mock_client, expect_action_batch, expect_create, expect_get, expect_get_many};
    use crate::order_actor::OrderError;
    use crate::product_actor::{ProductAction, ProductActionResult};

    struct Mocks {
        order_client: OrderClient,
        customer_rx: mpsc::Receiver<ResourceRequest<Customer>>,
        product_rx: mpsc::Receiver<ResourceRequest<Product>>,
        order_rx: mpsc::Receiver<ResourceRequest<Order>>,
    }

    fn setup() -> Mocks {
        let (customer_inner, customer_rx) = create_mock_client::<Customer>(10);
        let (product_inner, product_rx) = create_mock_client::<Product>(10);
        let (order_inner, order_rx) = create_mock_client::<Order>(10);

        let order_client = OrderClient::new(
            order_inner,
            CustomerClient::new(customer_inner),
            ProductClient::new(product_inner),
        );
        Mocks { order_client, customer_rx, product_rx, order_rx }
    }

    fn request(lines: &[(&str, u32)]) -> CreateOrderRequest {
        CreateOrderRequest {
            customer_id: "customer_1".to_string(),
            products: lines.iter().map(|(id, qty)| ProductQuantity::new(*id, *qty)).collect(),
        }
    }

    fn alice() -> Customer {
        Customer::new("customer_1", "Alice", "alice@example.com")
    }

    async fn answer_customer(mocks: &mut Mocks) {
        let (customer_id, responder) = expect_get(&mut mocks.customer_rx).await.expect("Expected Customer Get");
        assert_eq!(customer_id, "customer_1");
        responder.send(Ok(Some(alice()))).unwrap();
    }

    #[tokio::test]
    async fn test_order_creation_flow() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move {
            client.create_order(request(&[("product_1", 2), ("product_2", 1), ("product_1", 3)])).await
        });

        answer_customer(&mut mocks).await;

        // Duplicates are merged before products are looked up
        let (ids, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        assert_eq!(ids, vec!["product_1".to_string(), "product_2".to_string()]);
        responder.send(Ok(vec![
            Product::new("product_2", "Chair", 100.0, 1),
            Product::new("product_1", "Lamp", 20.0, 5),
        ])).unwrap();

        // Stock is taken in one batch
        let (actions, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected Product ActionBatch");
        assert_eq!(actions, vec![
            ("product_1".to_string(), ProductAction::ReserveStock(5)),
            ("product_2".to_string(), ProductAction::ReserveStock(1)),
        ]);
        responder.send(Ok(vec![ProductActionResult::ReserveStock(0), ProductActionResult::ReserveStock(0)])).unwrap();

        // Lines carry the stored price
        let (params, responder) = expect_create(&mut mocks.order_rx).await.expect("Expected Order Create");
        assert_eq!(params.customer, alice());
        assert_eq!(params.products.len(), 2);
        assert_eq!(params.products[0].product_id, "product_1");
        assert_eq!(params.products[0].quantity, 5);
        assert_eq!(params.products[0].price, 20.0);
        assert_eq!(params.products[1].price, 100.0);
        let stored = Order {
            id: "order_1".to_string(),
            customer: params.customer.clone(),
            products: params.products.clone(),
            created_at: SystemTime::now(),
        };
        responder.send(Ok("order_1".to_string())).unwrap();

        let (order_id, responder) = expect_get(&mut mocks.order_rx).await.expect("Expected Order Get");
        assert_eq!(order_id, "order_1");
        responder.send(Ok(Some(stored.clone()))).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn test_unknown_customer_stops_before_products() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[("product_1", 1)])).await });

        let (_, responder) = expect_get(&mut mocks.customer_rx).await.expect("Expected Customer Get");
        responder.send(Ok(None)).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(result, Err(OrderError::CustomerNotFound("customer_1".to_string())));
        assert!(mocks.product_rx.try_recv().is_err());
        assert!(mocks.order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_insufficient_stock_takes_nothing() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[("product_1", 3), ("product_1", 3)])).await });

        answer_customer(&mut mocks).await;
        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 5)])).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(result, Err(OrderError::InsufficientQuantity {
            product_id: "product_1".to_string(),
            requested: 6,
            available: 5,
        }));
        assert!(mocks.product_rx.try_recv().is_err());
        assert!(mocks.order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_rejected_reservation_reports_fresh_stock() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[("product_1", 4)])).await });

        answer_customer(&mut mocks).await;
        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 5)])).unwrap();

        // Another order got there first
        let (_, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected Product ActionBatch");
        responder.send(Err(FrameworkError::Rejected("Insufficient stock".to_string()))).unwrap();

        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 1)])).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(result, Err(OrderError::InsufficientQuantity {
            product_id: "product_1".to_string(),
            requested: 4,
            available: 1,
        }));
        assert!(mocks.order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_failed_order_write_releases_stock() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[("product_1", 2)])).await });

        answer_customer(&mut mocks).await;
        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 5)])).unwrap();
        let (_, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected Product ActionBatch");
        responder.send(Ok(vec![ProductActionResult::ReserveStock(3)])).unwrap();

        let (_, responder) = expect_create(&mut mocks.order_rx).await.expect("Expected Order Create");
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        let (actions, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected restock");
        assert_eq!(actions, vec![("product_1".to_string(), ProductAction::Restock(2))]);
        responder.send(Ok(vec![ProductActionResult::Restock(5)])).unwrap();

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));
    }

    #[tokio::test]
    async fn test_empty_request_checks_customer_first() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[])).await });

        answer_customer(&mut mocks).await;

        let result = order_task.await.unwrap();
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
        assert!(mocks.product_rx.try_recv().is_err());
        assert!(mocks.order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_refused_reservation_is_sent_again_when_stock_is_back() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[("product_1", 4)])).await });

        answer_customer(&mut mocks).await;
        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 5)])).unwrap();

        let (_, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected Product ActionBatch");
        responder.send(Err(FrameworkError::Rejected("Insufficient stock".to_string()))).unwrap();

        // Stock was released by then, at a new price
        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 25.0, 6)])).unwrap();

        let (actions, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected second ActionBatch");
        assert_eq!(actions, vec![("product_1".to_string(), ProductAction::ReserveStock(4))]);
        responder.send(Ok(vec![ProductActionResult::ReserveStock(2)])).unwrap();

        let (params, responder) = expect_create(&mut mocks.order_rx).await.expect("Expected Order Create");
        assert_eq!(params.products[0].price, 25.0);
        let stored = Order {
            id: "order_1".to_string(),
            customer: params.customer.clone(),
            products: params.products.clone(),
            created_at: SystemTime::now(),
        };
        responder.send(Ok("order_1".to_string())).unwrap();
        let (_, responder) = expect_get(&mut mocks.order_rx).await.expect("Expected Order Get");
        responder.send(Ok(Some(stored.clone()))).unwrap();

        assert_eq!(order_task.await.unwrap(), Ok(stored));
    }

    #[tokio::test]
    async fn test_reservation_gives_up_when_stock_keeps_moving() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[("product_1", 4)])).await });

        answer_customer(&mut mocks).await;
        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 5)])).unwrap();

        // Every batch is refused while every re-check passes
        for _ in 0..2 {
            let (_, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected Product ActionBatch");
            responder.send(Err(FrameworkError::Rejected("Insufficient stock".to_string()))).unwrap();
            let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
            responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 5)])).unwrap();
        }

        let result = order_task.await.unwrap();
        assert_eq!(result, Err(OrderError::StockContention { attempts: 2 }));
        assert_eq!(result.unwrap_err().to_string(), "Product with insufficient quantity");
        assert!(mocks.order_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_unreadable_order_keeps_stock_taken() {
        let mut mocks = setup();
        let client = mocks.order_client.clone();
        let order_task = tokio::spawn(async move { client.create_order(request(&[("product_1", 2)])).await });

        answer_customer(&mut mocks).await;
        let (_, responder) = expect_get_many(&mut mocks.product_rx).await.expect("Expected Product GetMany");
        responder.send(Ok(vec![Product::new("product_1", "Lamp", 20.0, 5)])).unwrap();
        let (_, responder) = expect_action_batch(&mut mocks.product_rx).await.expect("Expected Product ActionBatch");
        responder.send(Ok(vec![ProductActionResult::ReserveStock(3)])).unwrap();

        let (_, responder) = expect_create(&mut mocks.order_rx).await.expect("Expected Order Create");
        responder.send(Ok("order_1".to_string())).unwrap();
        let (_, responder) = expect_get(&mut mocks.order_rx).await.expect("Expected Order Get");
        responder.send(Ok(None)).unwrap();

        let result = order_task.await.unwrap();
        assert_eq!(result, Err(OrderError::NotFound("order_1".to_string())));
        // The order was written, so its stock is not handed back
        assert!(mocks.product_rx.try_recv().is_err());
    }
}

use tracing::{debug, instrument};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::{Product, ProductCreate, ProductQuantity, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl_basic_client!(ProductClient, Product, ProductError, product);

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}

/// Rejections of stock actions are stock problems, not invalid input.
fn stock_error(e: FrameworkError) -> ProductError {
    match e {
        FrameworkError::Rejected(msg) => ProductError::StockRejected(msg),
        other => ProductError::from(other),
    }
}

impl ProductClient {
    #[instrument(skip(self, params), fields(product_name = %params.name))]
    pub async fn create_product(&self, params: ProductCreate) -> Result<String, ProductError> {
        debug!("Sending request");
        let name = params.name.clone();
        self.inner.create(params).await.map_err(|e| match e {
            FrameworkError::Conflict(_) => ProductError::AlreadyExists(name),
            other => ProductError::from(other),
        })
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn update_product(&self, id: String, update: ProductUpdate) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn find_by_name(&self, name: String) -> Result<Option<Product>, ProductError> {
        debug!("Sending request");
        self.inner
            .find_first(move |product: &Product| product.name == name)
            .await
            .map_err(ProductError::from)
    }

    /// Returns the stored products among `ids`; unknown ids are left out.
    #[instrument(skip(self, ids), fields(requested = ids.len()))]
    pub async fn find_all_by_id(&self, ids: Vec<String>) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.get_many(ids).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: String) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::CheckStock).await.map_err(stock_error)? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units of one product. Returns the stock left.
    #[instrument(skip(self))]
    #[allow(dead_code)]
    pub async fn reserve_stock(&self, id: String, quantity: u32) -> Result<u32, ProductError> {
        debug!("Sending request");
        match self.inner.perform_action(id, ProductAction::ReserveStock(quantity)).await.map_err(stock_error)? {
            ProductActionResult::ReserveStock(remaining) => Ok(remaining),
            other => Err(unexpected(other)),
        }
    }

    /// Decrements the stock of every listed product in one step.
    ///
    /// Either all products are decremented or none is. Returns the remaining
    /// quantity of each product, in input order.
    #[instrument(skip(self, products), fields(products = products.len()))]
    pub async fn update_quantity(&self, products: &[ProductQuantity]) -> Result<Vec<ProductQuantity>, ProductError> {
        debug!("Sending request");
        self.apply_batch(products, ProductAction::ReserveStock).await
    }

    /// Puts stock back for every listed product in one step.
    #[instrument(skip(self, products), fields(products = products.len()))]
    pub async fn restock(&self, products: &[ProductQuantity]) -> Result<Vec<ProductQuantity>, ProductError> {
        debug!("Sending request");
        self.apply_batch(products, ProductAction::Restock).await
    }

    async fn apply_batch(
        &self,
        products: &[ProductQuantity],
        action: fn(u32) -> ProductAction,
    ) -> Result<Vec<ProductQuantity>, ProductError> {
        let actions = products
            .iter()
            .map(|p| (p.id.clone(), action(p.quantity)))
            .collect();
        let results = self.inner.perform_batch(actions).await.map_err(stock_error)?;

        products
            .iter()
            .zip(results)
            .map(|(product, result)| match result {
                ProductActionResult::ReserveStock(remaining) | ProductActionResult::Restock(remaining) => {
                    Ok(ProductQuantity::new(product.id.clone(), remaining))
                }
                other => Err(unexpected(other)),
            })
            .collect()
    }
}

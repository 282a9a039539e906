use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductUpdate};
use super::actions::{ProductAction, ProductActionResult};

fn validate_price(price: f64) -> Result<(), String> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(format!("Invalid price: {}", price))
    }
}

impl Entity for Product {
    type Id = String;
    type CreateParams = ProductCreate;
    type UpdateParams = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;

    fn id(&self) -> &String { &self.id }

    /// Creates a new Product from creation parameters.
    fn from_create_params(id: String, params: ProductCreate) -> Result<Self, String> {
        if params.name.trim().is_empty() {
            return Err("Product name required".to_string());
        }
        validate_price(params.price)?;
        Ok(Self::new(id, params.name, params.price, params.quantity))
    }

    /// Updates the product's price and/or quantity.
    ///
    /// # Fields Updated
    /// - `price`: Product price
    /// - `quantity`: Available stock quantity
    fn on_update(&mut self, params: ProductUpdate) -> Result<(), String> {
        if let Some(price) = params.price {
            validate_price(price)?;
            self.price = price;
        }
        if let Some(quantity) = params.quantity {
            self.quantity = quantity;
        }
        Ok(())
    }

    /// Product names are unique.
    fn conflicts_with(&self, other: &Self) -> bool {
        self.name == other.name
    }

    fn check_action(&self, action: &ProductAction) -> Result<(), String> {
        match action {
            ProductAction::ReserveStock(amount) if *amount > self.quantity => Err(format!(
                "Insufficient stock: requested {}, available {}",
                amount, self.quantity
            )),
            ProductAction::Restock(amount) if self.quantity.checked_add(*amount).is_none() => {
                Err(format!("Stock overflow restocking {} units", amount))
            }
            _ => Ok(()),
        }
    }

    /// Handles product-specific actions.
    ///
    /// # Actions
    /// - `CheckStock`: Returns the current stock level
    /// - `ReserveStock(amount)`: Decrements stock by the specified amount
    /// - `Restock(amount)`: Increments stock by the specified amount
    fn handle_action(&mut self, action: ProductAction) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => {
                Ok(ProductActionResult::CheckStock(self.quantity))
            }
            ProductAction::ReserveStock(amount) => {
                self.quantity = self.quantity.checked_sub(amount).ok_or_else(|| {
                    format!("Insufficient stock: requested {}, available {}", amount, self.quantity)
                })?;
                Ok(ProductActionResult::ReserveStock(self.quantity))
            }
            ProductAction::Restock(amount) => {
                self.quantity = self.quantity.checked_add(amount).ok_or_else(|| {
                    format!("Stock overflow restocking {} units", amount)
                })?;
                Ok(ProductActionResult::Restock(self.quantity))
            }
        }
    }
}

use std::collections::HashMap;
use std::time::SystemTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::domain::Customer;

/// A line of an order: one distinct product, priced at the moment of purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderProduct {
    pub product_id: String,
    pub price: f64,
    pub quantity: u32,
}

/// Represents a placed customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub customer: Customer,
    pub products: Vec<OrderProduct>,
    pub created_at: SystemTime,
}

/// Payload for persisting a new order once it has passed validation.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer: Customer,
    pub products: Vec<OrderProduct>,
}

impl Order {
    pub fn total(&self) -> f64 {
        self.products
            .iter()
            .map(|line| line.price * f64::from(line.quantity))
            .sum()
    }
}

/// A requested product and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub id: String,
    pub quantity: u32,
}

impl ProductQuantity {
    pub fn new(id: impl Into<String>, quantity: u32) -> Self {
        Self { id: id.into(), quantity }
    }
}

/// Incoming order placement request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub products: Vec<ProductQuantity>,
}

#[derive(Debug, Clone, Error, PartialEq)]
#[error("Quantity overflow for product {0}")]
pub struct QuantityOverflow(pub String);

/// Collapses repeated product ids into one entry each, summing quantities.
///
/// Entries keep the position of the first occurrence of their id.
pub fn merge_product_quantities(
    products: &[ProductQuantity],
) -> Result<Vec<ProductQuantity>, QuantityOverflow> {
    let mut merged: Vec<ProductQuantity> = Vec::with_capacity(products.len());
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for product in products {
        match positions.get(product.id.as_str()) {
            Some(&index) => {
                let entry = &mut merged[index];
                entry.quantity = entry.quantity
                    .checked_add(product.quantity)
                    .ok_or_else(|| QuantityOverflow(product.id.clone()))?;
            }
            None => {
                positions.insert(product.id.as_str(), merged.len());
                merged.push(product.clone());
            }
        }
    }

    Ok(merged)
}

/// A placed order and its line items.
///
/// # Consistency
/// `total_price` and each line's `quantity` are fixed when the order is placed.
/// A line's `name`, `description` and `price` are display fields: reads overlay the
/// catalog's current values onto them, so they may differ from what was charged.
use crate::model::Product;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line item: the product as resolved from the catalog plus the ordered quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: u32,
}

impl OrderedProduct {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            quantity,
        }
    }

    /// Replace the display fields with the catalog's current values.
    pub fn overlay(&mut self, current: &Product) {
        self.name.clone_from(&current.name);
        self.description.clone_from(&current.description);
        self.price = current.price;
    }

    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
    pub total_price: f64,
    pub products: Vec<OrderedProduct>,
}

impl Order {
    /// Creates a new Order with a fresh id and `created_at = now`.
    ///
    /// # Notes
    /// The total is computed here, once. Later reads never recompute it.
    pub fn place(account_id: impl Into<String>, products: Vec<OrderedProduct>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            account_id: account_id.into(),
            created_at: Utc::now(),
            total_price: Self::total_of(&products),
            products,
        }
    }

    /// Sum of `price × quantity` over `products`.
    pub fn total_of(products: &[OrderedProduct]) -> f64 {
        products.iter().map(OrderedProduct::subtotal).sum()
    }

    /// Ids of the products on this order, in line order.
    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|p| p.id.as_str())
    }
}

/// One requested line of a new order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product_id: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

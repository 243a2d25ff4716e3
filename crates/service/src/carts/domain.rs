use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::storage::Record;

/// One line of a cart. `product` is not checked against the products collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartItem {
    pub product: String,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    pub id: String,
    #[serde(default)]
    pub products: Vec<CartItem>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Record for Cart {
    fn id(&self) -> &str { &self.id }
}

impl Cart {
    pub fn new(id: String) -> Self {
        Self { id, products: Vec::new(), extra: Map::new() }
    }

    /// Bump the quantity of an existing line for `product_id`, or append a
    /// new line with quantity 1.
    pub fn add_product(&mut self, product_id: &str) {
        match self.products.iter_mut().find(|item| item.product == product_id) {
            Some(item) => item.quantity += 1,
            None => self.products.push(CartItem { product: product_id.to_string(), quantity: 1 }),
        }
    }
}

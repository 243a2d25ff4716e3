use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::carts::domain::Cart;
use crate::carts::CARTS;
use crate::errors::ServiceError;
use crate::storage::{Collection, CollectionStore, Stored};

/// Cart operations over the `carts` collection. Carts are never deleted.
pub struct CartService {
    carts: Collection<Cart>,
}

impl CartService {
    pub fn new(store: Arc<dyn CollectionStore>) -> Self {
        Self { carts: Collection::new(store, CARTS) }
    }

    pub async fn get(&self, id: &str) -> Option<Stored<Cart>> {
        self.carts.read().await.into_iter().find(|c| c.id() == Some(id))
    }

    #[instrument(skip_all)]
    pub async fn create(&self) -> Result<Cart, ServiceError> {
        let cart = Cart::new(Uuid::new_v4().to_string());
        let created = cart.clone();
        self.carts
            .update(move |all| {
                all.push(Stored::Typed(cart));
                Ok(())
            })
            .await?;
        info!(id = %created.id, "cart created");
        Ok(created)
    }

    /// Add one unit of `product_id` to the cart. The cart must exist and be a
    /// well-formed cart record; nothing is written otherwise.
    #[instrument(skip(self))]
    pub async fn add_product(&self, cart_id: &str, product_id: &str) -> Result<Cart, ServiceError> {
        let cart = self
            .carts
            .update(|all| {
                let slot = all.iter_mut().find(|c| c.id() == Some(cart_id)).ok_or_else(|| ServiceError::not_found("Cart"))?;
                match slot {
                    Stored::Typed(cart) => {
                        cart.add_product(product_id);
                        Ok(cart.clone())
                    }
                    Stored::Raw(_) => Err(ServiceError::Storage(format!("cart {cart_id} is not a well-formed cart record"))),
                }
            })
            .await?;
        info!(cart_id = %cart.id, %product_id, "product added to cart");
        Ok(cart)
    }
}

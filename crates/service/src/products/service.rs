use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::products::domain::{NewProduct, Product, ProductPatch, RequiredFieldPolicy};
use crate::products::PRODUCTS;
use crate::storage::{Collection, CollectionStore, Stored};

/// Product CRUD over the `products` collection. Lookups are linear scans on `id`.
pub struct ProductService {
    products: Collection<Product>,
    policy: RequiredFieldPolicy,
}

impl ProductService {
    pub fn new(store: Arc<dyn CollectionStore>, policy: RequiredFieldPolicy) -> Self {
        Self { products: Collection::new(store, PRODUCTS), policy }
    }

    pub async fn list(&self) -> Vec<Stored<Product>> {
        self.products.read().await
    }

    pub async fn get(&self, id: &str) -> Option<Stored<Product>> {
        self.products.read().await.into_iter().find(|p| p.id() == Some(id))
    }

    /// Validate, assign a fresh id, append and persist.
    #[instrument(skip_all)]
    pub async fn create(&self, input: NewProduct) -> Result<Product, ServiceError> {
        let product = input.into_product(Uuid::new_v4().to_string(), self.policy)?;
        let created = product.clone();
        self.products
            .update(move |all| {
                all.push(Stored::Typed(product));
                Ok(())
            })
            .await?;
        info!(id = %created.id, code = ?created.code, "product created");
        Ok(created)
    }

    /// Overwrite the patch fields of the product with `id`.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: ProductPatch) -> Result<Stored<Product>, ServiceError> {
        let updated = self
            .products
            .update(|all| {
                let slot = all.iter_mut().find(|p| p.id() == Some(id)).ok_or_else(|| ServiceError::not_found("Product"))?;
                let mut value = serde_json::to_value(&*slot).map_err(|e| ServiceError::Storage(e.to_string()))?;
                let record = value
                    .as_object_mut()
                    .ok_or_else(|| ServiceError::Storage(format!("product {id} is not a JSON object")))?;
                patch.apply(record);
                *slot = match serde_json::from_value::<Product>(value.clone()) {
                    Ok(product) => Stored::Typed(product),
                    Err(_) => Stored::Raw(value),
                };
                Ok(slot.clone())
            })
            .await?;
        info!(%id, "product updated");
        Ok(updated)
    }

    /// Remove the product with `id`; returns whether it existed.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let removed = self
            .products
            .update(|all| match all.iter().position(|p| p.id() == Some(id)) {
                Some(idx) => {
                    all.remove(idx);
                    Ok(())
                }
                None => Err(ServiceError::not_found("Product")),
            })
            .await;
        match removed {
            Ok(()) => {
                info!(%id, "product deleted");
                Ok(true)
            }
            Err(ServiceError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

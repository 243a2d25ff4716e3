pub mod domain;
pub mod service;

pub use domain::{NewProduct, Product, ProductPatch, RequiredFieldPolicy};
pub use service::ProductService;

/// Collection name for products.
pub const PRODUCTS: &str = "products";

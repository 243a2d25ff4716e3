pub mod domain;
pub mod service;

pub use domain::{Cart, CartItem};
pub use service::CartService;

/// Collection name for carts.
pub const CARTS: &str = "carts";

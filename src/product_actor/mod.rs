//! Product-specific domain logic: id assignment and field overlay.

pub mod entity;
pub mod error;

pub use entity::next_product_id;
pub use error::*;

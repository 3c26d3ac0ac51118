//! Typed client handles over the generic resource actors.

pub mod product_client;

pub use product_client::ProductClient;

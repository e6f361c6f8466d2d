//! Aggregates module
pub mod order;
pub mod customer;
pub mod product;

pub use order::{Order, LineItem, ProductRef, ProductSummary, ShippingAddress};
pub use customer::Customer;
pub use product::{Product, UNCATEGORIZED};

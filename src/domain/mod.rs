//! Storefront domain: read models and value objects
pub mod aggregates;
pub mod value_objects;

pub use aggregates::{Customer, LineItem, Order, Product, ProductRef, ShippingAddress};
pub use value_objects::{OrderStatus, PeriodError, ReportPeriod};

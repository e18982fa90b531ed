//! Domain models for products, customers, and orders.

pub mod customer;
pub mod order;
pub mod product;

pub use customer::Customer;
pub use order::{LineItem, Order};
pub use product::Product;

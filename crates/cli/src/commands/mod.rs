//! Command implementations, one module per resource.

pub mod auth;
pub mod contacts;
pub mod customers;
pub mod orders;
pub mod products;
pub mod vouchers;

//! Cached query facades.
//!
//! One facade per resource, reachable from the accessors on
//! [`ApiClient`](crate::ApiClient). Reads go through the shared
//! [`QueryCache`](crate::cache::QueryCache) under stable string keys;
//! mutations call the endpoint and then invalidate the groups the change
//! affects, so the next read of an affected query refetches. Entries are
//! stamped with a group per resource collection plus a group per entity, which
//! keeps an update to one product from evicting every other product detail.

mod admins;
mod categories;
mod contacts;
mod customers;
mod favorites;
mod orders;
mod products;
mod reviews;
mod vouchers;

pub use admins::Admins;
pub use categories::Categories;
pub use contacts::Contacts;
pub use customers::Customers;
pub use favorites::Favorites;
pub use orders::Orders;
pub use products::Products;
pub use reviews::Reviews;
pub use vouchers::Vouchers;

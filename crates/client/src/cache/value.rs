//! Cached payload types.

use lumera_core::Page;

use crate::api::types::{
    Admin, Category, ContactMessage, Customer, FavoriteItem, FavoriteStats, Order, OrderStats,
    OrderTimeSeriesPoint, Product, Review, UnreadContactCount, Voucher, VoucherStats,
};

/// Everything the query cache can hold.
///
/// Single entities are boxed to keep the enum small; pages and lists
/// already live behind a `Vec`.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Admin(Box<Admin>),
    Admins(Page<Admin>),
    Customer(Box<Customer>),
    Customers(Page<Customer>),
    Product(Box<Product>),
    Products(Page<Product>),
    Category(Box<Category>),
    Categories(Page<Category>),
    Order(Box<Order>),
    Orders(Page<Order>),
    OrderStats(OrderStats),
    OrderTimeSeries(Vec<OrderTimeSeriesPoint>),
    OrderPayments(Vec<serde_json::Value>),
    Voucher(Box<Voucher>),
    Vouchers(Page<Voucher>),
    ActiveVouchers(Vec<Voucher>),
    VoucherStats(VoucherStats),
    Review(Box<Review>),
    Reviews(Page<Review>),
    ProductReviewStats(serde_json::Value),
    Favorites(Page<FavoriteItem>),
    FavoriteStats(FavoriteStats),
    Contacts(Vec<ContactMessage>),
    UnreadContacts(UnreadContactCount),
}

/// Payloads that know their [`CacheValue`] variant.
///
/// The cache stores every payload behind the one enum; this trait wraps and
/// unwraps it so queries stay typed. Each payload type maps to exactly one
/// variant.
pub trait Cacheable: Send + Sync + 'static {
    /// Wrap the payload in its variant.
    fn into_cache_value(self) -> CacheValue;

    /// Whether a cached value holds this payload type.
    fn matches(value: &CacheValue) -> bool;

    /// Unwrap the payload; `None` when the variant belongs to another type.
    fn from_cache_value(value: CacheValue) -> Option<Self>
    where
        Self: Sized;
}

macro_rules! impl_cacheable {
    ($variant:ident => boxed $ty:ty) => {
        impl Cacheable for $ty {
            fn into_cache_value(self) -> CacheValue {
                CacheValue::$variant(Box::new(self))
            }

            fn matches(value: &CacheValue) -> bool {
                matches!(value, CacheValue::$variant(_))
            }

            fn from_cache_value(value: CacheValue) -> Option<Self> {
                match value {
                    CacheValue::$variant(inner) => Some(*inner),
                    _ => None,
                }
            }
        }
    };
    ($variant:ident => $ty:ty) => {
        impl Cacheable for $ty {
            fn into_cache_value(self) -> CacheValue {
                CacheValue::$variant(self)
            }

            fn matches(value: &CacheValue) -> bool {
                matches!(value, CacheValue::$variant(_))
            }

            fn from_cache_value(value: CacheValue) -> Option<Self> {
                match value {
                    CacheValue::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_cacheable!(Admin => boxed Admin);
impl_cacheable!(Admins => Page<Admin>);
impl_cacheable!(Customer => boxed Customer);
impl_cacheable!(Customers => Page<Customer>);
impl_cacheable!(Product => boxed Product);
impl_cacheable!(Products => Page<Product>);
impl_cacheable!(Category => boxed Category);
impl_cacheable!(Categories => Page<Category>);
impl_cacheable!(Order => boxed Order);
impl_cacheable!(Orders => Page<Order>);
impl_cacheable!(OrderStats => OrderStats);
impl_cacheable!(OrderTimeSeries => Vec<OrderTimeSeriesPoint>);
impl_cacheable!(OrderPayments => Vec<serde_json::Value>);
impl_cacheable!(Voucher => boxed Voucher);
impl_cacheable!(Vouchers => Page<Voucher>);
impl_cacheable!(ActiveVouchers => Vec<Voucher>);
impl_cacheable!(VoucherStats => VoucherStats);
impl_cacheable!(Review => boxed Review);
impl_cacheable!(Reviews => Page<Review>);
impl_cacheable!(ProductReviewStats => serde_json::Value);
impl_cacheable!(Favorites => Page<FavoriteItem>);
impl_cacheable!(FavoriteStats => FavoriteStats);
impl_cacheable!(Contacts => Vec<ContactMessage>);
impl_cacheable!(UnreadContacts => UnreadContactCount);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_variant() {
        let stats = serde_json::json!({"averageRating": 4.5});
        let value = stats.clone().into_cache_value();
        assert!(serde_json::Value::matches(&value));
        assert_eq!(serde_json::Value::from_cache_value(value).unwrap(), stats);
    }

    #[test]
    fn rejects_other_variants() {
        let value = Vec::<serde_json::Value>::new().into_cache_value();
        assert!(!serde_json::Value::matches(&value));
        assert!(serde_json::Value::from_cache_value(value).is_none());
    }
}

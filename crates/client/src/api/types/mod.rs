//! Wire types shared by the resource endpoints.
//!
//! Entities deserialize exactly what the backend sends, including its
//! Mongo-flavored `_id` field names. Request payloads skip unset
//! optional fields so partial updates only touch what the caller set.

mod admin;
mod auth;
mod category;
mod contact;
mod customer;
mod favorite;
mod order;
mod product;
mod review;
mod voucher;

pub use admin::{
    Admin, AdminListParams, AdminRole, ChangePasswordRequest, CreateAdminRequest,
    UpdateAdminRequest,
};
pub use auth::{LoginGrant, LoginRequest, RefreshGrant};
pub use category::{Category, CategoryInput, CategoryListParams};
pub use contact::{ContactMessage, ContactStatus, ReplyContactRequest, UnreadContactCount};
pub use customer::{
    CreateCustomerRequest, Customer, CustomerListParams, UpdateCustomerRequest,
};
pub use favorite::{
    FavoriteCategory, FavoriteCustomer, FavoriteItem, FavoriteProduct, FavoriteStats,
    FavoritesListParams, PopularProduct, RemoveFavoriteRequest,
};
pub use order::{
    AppliedDiscount, CancelOrderRequest, Granularity, Order, OrderCustomer, OrderDetail,
    OrderFilters, OrderProcessor, OrderStats, OrderStatsParams, OrderStatus,
    OrderStatusBreakdown, OrderTimeSeriesParams, OrderTimeSeriesPoint, PaymentMethod,
    UpdateOrderStatusRequest,
};
pub use product::{Product, ProductInput, ProductListParams};
pub use review::{
    ApproveReviewRequest, RejectReviewRequest, Review, ReviewCustomer, ReviewFilters,
    ReviewProduct, ReviewStatus,
};
pub use voucher::{
    CreateVoucherRequest, DiscountType, UpdateVoucherRequest, ValidateVoucherRequest,
    Voucher, VoucherCreator, VoucherFilters, VoucherStats, VoucherTypeBreakdown,
    VoucherValidation,
};

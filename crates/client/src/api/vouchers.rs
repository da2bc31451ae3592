//! Voucher endpoints.

use lumera_core::{Page, VoucherId};
use serde::Deserialize;

use crate::ApiClient;
use crate::api::types::{
    CreateVoucherRequest, UpdateVoucherRequest, ValidateVoucherRequest, Voucher, VoucherFilters,
    VoucherValidation,
};
use crate::error::ApiResult;

/// Bare list shape used by `GET /vouchers`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VouchersWire {
    vouchers: Vec<Voucher>,
    total: u64,
    page: u32,
    limit: u32,
    total_pages: u32,
}

/// `GET|POST|PATCH|DELETE /vouchers` plus code lookup and validation.
#[derive(Debug, Clone, Copy)]
pub struct VouchersApi<'a> {
    client: &'a ApiClient,
}

impl<'a> VouchersApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// List vouchers with filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn list(&self, filters: &VoucherFilters) -> ApiResult<Page<Voucher>> {
        let wire: VouchersWire = self.client.get_query("/vouchers", filters).await?;
        Ok(Page::new(
            wire.vouchers,
            wire.total,
            wire.page,
            wire.limit,
            wire.total_pages,
        ))
    }

    /// Fetch one voucher by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get(&self, id: &VoucherId) -> ApiResult<Voucher> {
        self.client.get(&format!("/vouchers/{id}")).await
    }

    /// Look a voucher up by its discount code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn by_code(&self, code: &str) -> ApiResult<Voucher> {
        self.client.get(&format!("/vouchers/code/{code}")).await
    }

    /// Vouchers that are currently usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn active(&self) -> ApiResult<Vec<Voucher>> {
        self.client.get("/vouchers/active").await
    }

    /// Create a voucher.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create(&self, voucher: &CreateVoucherRequest) -> ApiResult<Voucher> {
        self.client.post("/vouchers", voucher).await
    }

    /// Update a voucher; unset fields are left as they are.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update(&self, id: &VoucherId, voucher: &UpdateVoucherRequest) -> ApiResult<Voucher> {
        self.client.patch(&format!("/vouchers/{id}"), voucher).await
    }

    /// Delete a voucher.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete(&self, id: &VoucherId) -> ApiResult<()> {
        self.client.delete(&format!("/vouchers/{id}")).await
    }

    /// Check whether a code applies to an order value, and for how much.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails. An inapplicable voucher is not
    /// an error; it comes back as `is_valid: false` with a reason.
    pub async fn validate(&self, request: &ValidateVoucherRequest) -> ApiResult<VoucherValidation> {
        self.client.post("/vouchers/validate", request).await
    }
}

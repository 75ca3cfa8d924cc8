//! Interface contracts for engine database backends.
//!
//! [`CommerceStore`] defines the write path: tenant resolution and the atomic per-entity upserts
//! that both the webhook ingestor and the full sync go through. [`MetricsProjection`] defines the
//! read-only aggregates the dashboard consumes. Backends implement both; the server's endpoint
//! tests mock them.
use thiserror::Error;

use crate::db_types::{
    Customer,
    DateBucket,
    NewCustomer,
    NewOrder,
    NewProduct,
    NewTenant,
    Order,
    OverviewMetrics,
    Product,
    Tenant,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Write-side contract of the commerce store.
///
/// Every `upsert_*` call is a single atomic insert-or-update keyed on the entity's Shopify id:
/// concurrent calls for the same external id must never produce duplicate rows, and a redelivered
/// value always refreshes the mutable fields (last writer wins).
#[allow(async_fn_in_trait)]
pub trait CommerceStore {
    /// Creates the tenant, or refreshes its access credential if the domain is already known.
    async fn upsert_tenant(&self, tenant: NewTenant) -> Result<Tenant, StoreError>;

    async fn fetch_tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError>;

    /// The single active tenant this deployment serves. `None` until the first sync has run.
    async fn fetch_first_tenant(&self) -> Result<Option<Tenant>, StoreError>;

    async fn upsert_product(&self, tenant_id: i64, product: NewProduct) -> Result<Product, StoreError>;

    async fn upsert_customer(&self, tenant_id: i64, customer: NewCustomer) -> Result<Customer, StoreError>;

    async fn upsert_order(&self, tenant_id: i64, order: NewOrder) -> Result<Order, StoreError>;

    async fn fetch_order_by_shopify_id(&self, shopify_order_id: i64) -> Result<Option<Order>, StoreError>;
}

/// The full backend contract the server wires its routes against: the write path plus the
/// dashboard projections. Blanket-implemented, so test mocks only implement the two base traits.
pub trait InsightsBackend: CommerceStore + MetricsProjection {}

impl<T: CommerceStore + MetricsProjection> InsightsBackend for T {}

/// Read-only aggregates over the store. Consumes committed rows only; never mutates.
#[allow(async_fn_in_trait)]
pub trait MetricsProjection {
    async fn overview(&self, tenant_id: i64) -> Result<OverviewMetrics, StoreError>;

    /// Orders bucketed by calendar date, ascending. Orders without a source timestamp are
    /// excluded entirely rather than filed under a sentinel date.
    async fn orders_by_date(&self, tenant_id: i64) -> Result<Vec<DateBucket>, StoreError>;

    /// The `count` highest-spending customers, descending by lifetime spend.
    async fn top_customers(&self, tenant_id: i64, count: i64) -> Result<Vec<Customer>, StoreError>;
}

use crate::{
    db_types::{Customer, DateBucket, OverviewMetrics},
    traits::{CommerceStore, MetricsProjection, StoreError},
};

/// How many customers the top-customers projection returns.
pub const TOP_CUSTOMER_COUNT: i64 = 5;

/// Read-only dashboard projections, scoped to the deployment's active tenant. Every method
/// returns `None` when no tenant has been synced yet.
pub struct MetricsApi<B> {
    db: B,
}

impl<B: CommerceStore + MetricsProjection> MetricsApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn overview(&self) -> Result<Option<OverviewMetrics>, StoreError> {
        let Some(tenant) = self.db.fetch_first_tenant().await? else { return Ok(None) };
        self.db.overview(tenant.id).await.map(Some)
    }

    pub async fn orders_by_date(&self) -> Result<Option<Vec<DateBucket>>, StoreError> {
        let Some(tenant) = self.db.fetch_first_tenant().await? else { return Ok(None) };
        self.db.orders_by_date(tenant.id).await.map(Some)
    }

    pub async fn top_customers(&self) -> Result<Option<Vec<Customer>>, StoreError> {
        let Some(tenant) = self.db.fetch_first_tenant().await? else { return Ok(None) };
        self.db.top_customers(tenant.id, TOP_CUSTOMER_COUNT).await.map(Some)
    }
}

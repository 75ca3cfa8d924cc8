//! `SqliteDatabase` is the concrete SQLite implementation of the commerce store and the metrics
//! projection.
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{create_schema, customers, metrics, new_pool, orders, products, tenants};
use crate::{
    db_types::{
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
    },
    traits::{CommerceStore, MetricsProjection, StoreError},
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connects to the database at `url` and makes sure the schema exists.
    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = new_pool(url, max_connections).await?;
        create_schema(&pool).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }
}

impl CommerceStore for SqliteDatabase {
    async fn upsert_tenant(&self, tenant: NewTenant) -> Result<Tenant, StoreError> {
        let mut conn = self.pool.acquire().await?;
        tenants::upsert_tenant(tenant, &mut conn).await
    }

    async fn fetch_tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        tenants::fetch_tenant_by_domain(domain, &mut conn).await
    }

    async fn fetch_first_tenant(&self) -> Result<Option<Tenant>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        tenants::fetch_first_tenant(&mut conn).await
    }

    async fn upsert_product(&self, tenant_id: i64, product: NewProduct) -> Result<Product, StoreError> {
        let mut conn = self.pool.acquire().await?;
        products::upsert_product(tenant_id, product, &mut conn).await
    }

    async fn upsert_customer(&self, tenant_id: i64, customer: NewCustomer) -> Result<Customer, StoreError> {
        let mut conn = self.pool.acquire().await?;
        customers::upsert_customer(tenant_id, customer, &mut conn).await
    }

    async fn upsert_order(&self, tenant_id: i64, order: NewOrder) -> Result<Order, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::upsert_order(tenant_id, order, &mut conn).await
    }

    async fn fetch_order_by_shopify_id(&self, shopify_order_id: i64) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_by_shopify_id(shopify_order_id, &mut conn).await
    }
}

impl MetricsProjection for SqliteDatabase {
    async fn overview(&self, tenant_id: i64) -> Result<OverviewMetrics, StoreError> {
        let mut conn = self.pool.acquire().await?;
        metrics::overview(tenant_id, &mut conn).await
    }

    async fn orders_by_date(&self, tenant_id: i64) -> Result<Vec<DateBucket>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        metrics::orders_by_date(tenant_id, &mut conn).await
    }

    async fn top_customers(&self, tenant_id: i64, count: i64) -> Result<Vec<Customer>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        metrics::top_customers(tenant_id, count, &mut conn).await
    }
}

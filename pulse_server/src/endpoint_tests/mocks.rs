use mockall::mock;
use pulse_engine::{
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
    CommerceStore,
    MetricsProjection,
    StoreError,
};
use shopify_client::{ShopifyApiError, ShopifyCustomer, ShopifyOrder, ShopifyProduct, ShopifyReader};

mock! {
    pub Backend {}
    impl CommerceStore for Backend {
        async fn upsert_tenant(&self, tenant: NewTenant) -> Result<Tenant, StoreError>;
        async fn fetch_tenant_by_domain(&self, domain: &str) -> Result<Option<Tenant>, StoreError>;
        async fn fetch_first_tenant(&self) -> Result<Option<Tenant>, StoreError>;
        async fn upsert_product(&self, tenant_id: i64, product: NewProduct) -> Result<Product, StoreError>;
        async fn upsert_customer(&self, tenant_id: i64, customer: NewCustomer) -> Result<Customer, StoreError>;
        async fn upsert_order(&self, tenant_id: i64, order: NewOrder) -> Result<Order, StoreError>;
        async fn fetch_order_by_shopify_id(&self, shopify_order_id: i64) -> Result<Option<Order>, StoreError>;
    }
    impl MetricsProjection for Backend {
        async fn overview(&self, tenant_id: i64) -> Result<OverviewMetrics, StoreError>;
        async fn orders_by_date(&self, tenant_id: i64) -> Result<Vec<DateBucket>, StoreError>;
        async fn top_customers(&self, tenant_id: i64, count: i64) -> Result<Vec<Customer>, StoreError>;
    }
}

mock! {
    pub Upstream {}
    impl ShopifyReader for Upstream {
        async fn fetch_all_products(&self) -> Result<Vec<ShopifyProduct>, ShopifyApiError>;
        async fn fetch_all_customers(&self) -> Result<Vec<ShopifyCustomer>, ShopifyApiError>;
        async fn fetch_all_orders(&self) -> Result<Vec<ShopifyOrder>, ShopifyApiError>;
    }
}

//! Row types for the four entity kinds, plus the `New*` values that upserts consume.
//!
//! Every Product/Customer/Order row belongs to exactly one tenant, and the `shopify_*_id` columns
//! are the unique natural keys the upserts are keyed on. The `New*` types deliberately omit the
//! tenant id: a row can only be written once its owning tenant has been resolved.
use chrono::{DateTime, Utc};
use pulse_common::Money;
use serde::Serialize;
use sqlx::FromRow;

//--------------------------------------      Tenant        ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: i64,
    pub name: String,
    pub shopify_domain: String,
    #[serde(skip_serializing)]
    pub shopify_access_token: String,
}

#[derive(Debug, Clone)]
pub struct NewTenant {
    pub name: String,
    pub shopify_domain: String,
    pub shopify_access_token: String,
}

//--------------------------------------      Product       ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub shopify_product_id: i64,
    pub title: String,
    pub price: Money,
    pub tenant_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub shopify_product_id: i64,
    pub title: String,
    pub price: Money,
}

//--------------------------------------      Customer      ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub shopify_customer_id: i64,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total_spent: Money,
    pub tenant_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewCustomer {
    pub shopify_customer_id: i64,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total_spent: Money,
}

//--------------------------------------      Order         ----------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub shopify_order_id: i64,
    pub total_price: Money,
    pub currency: String,
    /// The order's creation time as reported by Shopify. `None` when the source omitted it or it
    /// could not be parsed; such orders are excluded from date-bucketed views.
    pub shopify_created_at: Option<DateTime<Utc>>,
    pub tenant_id: i64,
}

#[derive(Debug, Clone)]
pub struct NewOrder {
    pub shopify_order_id: i64,
    pub total_price: Money,
    pub currency: String,
    pub shopify_created_at: Option<DateTime<Utc>>,
}

//--------------------------------------   Metric results   ----------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewMetrics {
    pub total_customers: i64,
    pub total_orders: i64,
    pub total_revenue: Money,
}

/// One calendar-date bucket of the orders-by-date projection. Buckets are emitted in ascending
/// date order and only contain orders that carry a source timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateBucket {
    pub date: String,
    pub orders: i64,
    pub revenue: Money,
}

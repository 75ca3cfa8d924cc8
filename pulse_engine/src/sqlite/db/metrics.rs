use sqlx::SqliteConnection;

use crate::{
    db_types::{Customer, DateBucket, OverviewMetrics},
    traits::StoreError,
};
use pulse_common::Money;

pub async fn overview(tenant_id: i64, conn: &mut SqliteConnection) -> Result<OverviewMetrics, StoreError> {
    let (total_customers, total_orders, revenue_cents): (i64, i64, i64) = sqlx::query_as(
        r#"
            SELECT
                (SELECT COUNT(*) FROM customers WHERE tenant_id = $1),
                (SELECT COUNT(*) FROM orders WHERE tenant_id = $1),
                (SELECT COALESCE(SUM(total_price), 0) FROM orders WHERE tenant_id = $1);
        "#,
    )
    .bind(tenant_id)
    .fetch_one(conn)
    .await?;
    Ok(OverviewMetrics { total_customers, total_orders, total_revenue: Money::from_cents(revenue_cents) })
}

/// Orders grouped by the calendar date of their source timestamp, ascending. Rows with a NULL
/// timestamp are filtered out before bucketing so they can never skew a date's counts.
pub async fn orders_by_date(tenant_id: i64, conn: &mut SqliteConnection) -> Result<Vec<DateBucket>, StoreError> {
    let rows: Vec<(String, i64, i64)> = sqlx::query_as(
        r#"
            SELECT date(shopify_created_at) AS day, COUNT(*) AS orders, SUM(total_price) AS revenue
            FROM orders
            WHERE tenant_id = $1 AND shopify_created_at IS NOT NULL
            GROUP BY day
            ORDER BY day ASC;
        "#,
    )
    .bind(tenant_id)
    .fetch_all(conn)
    .await?;
    let buckets = rows
        .into_iter()
        .map(|(date, orders, revenue)| DateBucket { date, orders, revenue: Money::from_cents(revenue) })
        .collect();
    Ok(buckets)
}

pub async fn top_customers(
    tenant_id: i64,
    count: i64,
    conn: &mut SqliteConnection,
) -> Result<Vec<Customer>, StoreError> {
    let customers = sqlx::query_as(
        r#"
            SELECT * FROM customers
            WHERE tenant_id = $1
            ORDER BY total_spent DESC
            LIMIT $2;
        "#,
    )
    .bind(tenant_id)
    .bind(count)
    .fetch_all(conn)
    .await?;
    Ok(customers)
}

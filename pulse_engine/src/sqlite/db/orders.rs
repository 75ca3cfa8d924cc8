use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewOrder, Order},
    traits::StoreError,
};

/// Inserts the order, or refreshes price, currency and source timestamp when the Shopify order id
/// is already known. A single atomic statement: this is what makes webhook redelivery idempotent.
pub async fn upsert_order(
    tenant_id: i64,
    order: NewOrder,
    conn: &mut SqliteConnection,
) -> Result<Order, StoreError> {
    let order: Order = sqlx::query_as(
        r#"
            INSERT INTO orders (shopify_order_id, total_price, currency, shopify_created_at, tenant_id)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (shopify_order_id) DO UPDATE
            SET total_price = excluded.total_price,
                currency = excluded.currency,
                shopify_created_at = excluded.shopify_created_at
            RETURNING *;
        "#,
    )
    .bind(order.shopify_order_id)
    .bind(order.total_price)
    .bind(order.currency)
    .bind(order.shopify_created_at)
    .bind(tenant_id)
    .fetch_one(conn)
    .await?;
    trace!("🧾️ Order [{}] upserted with id {}", order.shopify_order_id, order.id);
    Ok(order)
}

pub async fn fetch_order_by_shopify_id(
    shopify_order_id: i64,
    conn: &mut SqliteConnection,
) -> Result<Option<Order>, StoreError> {
    let order = sqlx::query_as("SELECT * FROM orders WHERE shopify_order_id = $1")
        .bind(shopify_order_id)
        .fetch_optional(conn)
        .await?;
    Ok(order)
}

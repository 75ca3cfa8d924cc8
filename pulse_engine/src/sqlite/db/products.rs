use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewProduct, Product},
    traits::StoreError,
};

/// Inserts the product, or refreshes title and price when the Shopify product id is already
/// known. A single atomic statement; redelivery converges to the last writer's values. The owning
/// tenant is fixed on first sight and not rewritten on conflict.
pub async fn upsert_product(
    tenant_id: i64,
    product: NewProduct,
    conn: &mut SqliteConnection,
) -> Result<Product, StoreError> {
    let product: Product = sqlx::query_as(
        r#"
            INSERT INTO products (shopify_product_id, title, price, tenant_id)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (shopify_product_id) DO UPDATE
            SET title = excluded.title,
                price = excluded.price
            RETURNING *;
        "#,
    )
    .bind(product.shopify_product_id)
    .bind(product.title)
    .bind(product.price)
    .bind(tenant_id)
    .fetch_one(conn)
    .await?;
    trace!("📦️ Product [{}] upserted with id {}", product.shopify_product_id, product.id);
    Ok(product)
}

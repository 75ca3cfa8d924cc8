use log::trace;
use sqlx::SqliteConnection;

use crate::{
    db_types::{Customer, NewCustomer},
    traits::StoreError,
};

/// Inserts the customer, or refreshes the contact fields and lifetime spend when the Shopify
/// customer id is already known. A single atomic statement.
pub async fn upsert_customer(
    tenant_id: i64,
    customer: NewCustomer,
    conn: &mut SqliteConnection,
) -> Result<Customer, StoreError> {
    let customer: Customer = sqlx::query_as(
        r#"
            INSERT INTO customers (shopify_customer_id, email, first_name, last_name, total_spent, tenant_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (shopify_customer_id) DO UPDATE
            SET email = excluded.email,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                total_spent = excluded.total_spent
            RETURNING *;
        "#,
    )
    .bind(customer.shopify_customer_id)
    .bind(customer.email)
    .bind(customer.first_name)
    .bind(customer.last_name)
    .bind(customer.total_spent)
    .bind(tenant_id)
    .fetch_one(conn)
    .await?;
    trace!("🙋️ Customer [{}] upserted with id {}", customer.shopify_customer_id, customer.id);
    Ok(customer)
}

//! Low-level SQLite interactions.
//!
//! All interactions are plain functions taking a `&mut SqliteConnection` rather than stateful
//! structs. Callers obtain a connection from the pool, or open a transaction and pass `&mut *tx`,
//! without any other changes.
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod customers;
pub mod metrics;
pub mod orders;
pub mod products;
pub mod tenants;

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Creates the schema if it does not exist yet. Idempotent; runs at every startup.
///
/// The `shopify_*_id` unique constraints are the conflict targets of all upserts, which makes each
/// upsert a single atomic statement and the store's sole serialization point.
pub async fn create_schema(pool: &SqlitePool) -> Result<(), SqlxError> {
    const SCHEMA: [&str; 6] = [
        r#"CREATE TABLE IF NOT EXISTS tenants (
            id                   INTEGER PRIMARY KEY AUTOINCREMENT,
            name                 TEXT NOT NULL,
            shopify_domain       TEXT NOT NULL UNIQUE,
            shopify_access_token TEXT NOT NULL
        )"#,
        r#"CREATE TABLE IF NOT EXISTS products (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            shopify_product_id INTEGER NOT NULL UNIQUE,
            title              TEXT NOT NULL,
            price              INTEGER NOT NULL,
            tenant_id          INTEGER NOT NULL REFERENCES tenants (id)
        )"#,
        r#"CREATE TABLE IF NOT EXISTS customers (
            id                  INTEGER PRIMARY KEY AUTOINCREMENT,
            shopify_customer_id INTEGER NOT NULL UNIQUE,
            email               TEXT,
            first_name          TEXT,
            last_name           TEXT,
            total_spent         INTEGER NOT NULL,
            tenant_id           INTEGER NOT NULL REFERENCES tenants (id)
        )"#,
        r#"CREATE TABLE IF NOT EXISTS orders (
            id                 INTEGER PRIMARY KEY AUTOINCREMENT,
            shopify_order_id   INTEGER NOT NULL UNIQUE,
            total_price        INTEGER NOT NULL,
            currency           TEXT NOT NULL,
            shopify_created_at DATETIME,
            tenant_id          INTEGER NOT NULL REFERENCES tenants (id)
        )"#,
        "CREATE INDEX IF NOT EXISTS idx_orders_tenant_created ON orders (tenant_id, shopify_created_at)",
        "CREATE INDEX IF NOT EXISTS idx_customers_tenant_spent ON customers (tenant_id, total_spent)",
    ];
    for stmt in SCHEMA {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}

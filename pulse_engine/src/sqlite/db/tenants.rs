use log::debug;
use sqlx::SqliteConnection;

use crate::{
    db_types::{NewTenant, Tenant},
    traits::StoreError,
};

/// Creates the tenant, or rotates its access credential if the domain already exists. The domain
/// is the tenant's natural key and is never rewritten on conflict.
pub async fn upsert_tenant(tenant: NewTenant, conn: &mut SqliteConnection) -> Result<Tenant, StoreError> {
    let tenant: Tenant = sqlx::query_as(
        r#"
            INSERT INTO tenants (name, shopify_domain, shopify_access_token)
            VALUES ($1, $2, $3)
            ON CONFLICT (shopify_domain) DO UPDATE
            SET shopify_access_token = excluded.shopify_access_token
            RETURNING *;
        "#,
    )
    .bind(tenant.name)
    .bind(tenant.shopify_domain)
    .bind(tenant.shopify_access_token)
    .fetch_one(conn)
    .await?;
    debug!("🏬️ Tenant [{}] upserted with id {}", tenant.shopify_domain, tenant.id);
    Ok(tenant)
}

pub async fn fetch_tenant_by_domain(
    domain: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Tenant>, StoreError> {
    let tenant = sqlx::query_as("SELECT * FROM tenants WHERE shopify_domain = $1")
        .bind(domain)
        .fetch_optional(conn)
        .await?;
    Ok(tenant)
}

pub async fn fetch_first_tenant(conn: &mut SqliteConnection) -> Result<Option<Tenant>, StoreError> {
    let tenant = sqlx::query_as("SELECT * FROM tenants ORDER BY id LIMIT 1").fetch_optional(conn).await?;
    Ok(tenant)
}

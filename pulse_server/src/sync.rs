//! The full sync: pulls every product, customer and order from the Shopify Admin API and upserts
//! them into the local store.
//!
//! The sync is idempotent. Rows are keyed on their Shopify ids, so running it twice, or running it
//! over data the webhook already delivered, converges on the same store state. A record that
//! cannot be converted (unpriceable product, garbled money value) is logged and skipped rather
//! than aborting the run; an upstream or store failure aborts, since a partial pull would
//! silently undercount the catalogue.
use log::*;
use pulse_engine::{db_types::NewTenant, CommerceStore, StoreError};
use serde::{Deserialize, Serialize};
use shopify_client::{ShopifyApiError, ShopifyReader};
use thiserror::Error;

use crate::{
    config::ShopifyConfig,
    integrations::shopify::{
        new_customer_from_shopify_customer,
        new_order_from_shopify_order,
        new_product_from_shopify_product,
    },
};

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Could not fetch data from Shopify. {0}")]
    UpstreamError(#[from] ShopifyApiError),
    #[error("Could not save synced data. {0}")]
    StoreError(#[from] StoreError),
}

/// Counts of what a sync run actually wrote.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncReport {
    pub products: usize,
    pub customers: usize,
    pub orders: usize,
    pub skipped: usize,
}

/// The storefront a sync run writes under. Derived from the server's Shopify configuration.
#[derive(Debug, Clone)]
pub struct SyncTarget {
    pub name: String,
    pub shopify_domain: String,
    pub access_token: String,
}

impl From<&ShopifyConfig> for SyncTarget {
    fn from(config: &ShopifyConfig) -> Self {
        Self {
            name: "Primary Shopify store".to_string(),
            shopify_domain: config.shop.clone(),
            access_token: config.admin_access_token.reveal().clone(),
        }
    }
}

/// Runs a full sync: upserts the tenant, then pulls and upserts products, customers and orders in
/// that order. Everything lands under the single tenant row for `target.shopify_domain`.
pub async fn run_full_sync<B, S>(db: &B, shopify: &S, target: &SyncTarget) -> Result<SyncReport, SyncError>
where
    B: CommerceStore,
    S: ShopifyReader,
{
    let tenant = db
        .upsert_tenant(NewTenant {
            name: target.name.clone(),
            shopify_domain: target.shopify_domain.clone(),
            shopify_access_token: target.access_token.clone(),
        })
        .await?;
    let mut report = SyncReport::default();

    let products = shopify.fetch_all_products().await?;
    info!("🔄️ Fetched {} products from Shopify", products.len());
    for product in products {
        match new_product_from_shopify_product(product) {
            Ok(new_product) => {
                db.upsert_product(tenant.id, new_product).await?;
                report.products += 1;
            },
            Err(e) => {
                warn!("🔄️ Skipping product. {e}");
                report.skipped += 1;
            },
        }
    }

    let customers = shopify.fetch_all_customers().await?;
    info!("🔄️ Fetched {} customers from Shopify", customers.len());
    for customer in customers {
        match new_customer_from_shopify_customer(customer) {
            Ok(new_customer) => {
                db.upsert_customer(tenant.id, new_customer).await?;
                report.customers += 1;
            },
            Err(e) => {
                warn!("🔄️ Skipping customer. {e}");
                report.skipped += 1;
            },
        }
    }

    let orders = shopify.fetch_all_orders().await?;
    info!("🔄️ Fetched {} orders from Shopify", orders.len());
    for order in orders {
        match new_order_from_shopify_order(order) {
            Ok(new_order) => {
                db.upsert_order(tenant.id, new_order).await?;
                report.orders += 1;
            },
            Err(e) => {
                warn!("🔄️ Skipping order. {e}");
                report.skipped += 1;
            },
        }
    }

    info!(
        "🔄️ Sync for {} complete. {} products, {} customers, {} orders, {} skipped.",
        target.shopify_domain, report.products, report.customers, report.orders, report.skipped
    );
    Ok(report)
}

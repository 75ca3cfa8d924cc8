use log::*;

use crate::{
    db_types::{NewOrder, Order},
    events::ChangeHub,
    traits::{CommerceStore, StoreError},
};

/// Terminal states of applying one validated webhook event to the store.
#[derive(Debug)]
pub enum WebhookOutcome {
    /// The order was upserted; the row reflects the event's values.
    Applied(Order),
    /// The event's shop domain matched no stored tenant. Acknowledged without mutation so no
    /// orphan rows are ever created.
    UnknownTenant,
}

/// Applies validated change events to the store and publishes a data-changed hint after every
/// successful mutation. Safe to call concurrently: the store's atomic upsert is the only
/// serialization point.
pub struct IngestApi<B> {
    db: B,
    hub: ChangeHub,
}

impl<B: CommerceStore> IngestApi<B> {
    pub fn new(db: B, hub: ChangeHub) -> Self {
        Self { db, hub }
    }

    pub fn hub(&self) -> &ChangeHub {
        &self.hub
    }

    /// Applies an `orders/create` event for the storefront at `shop_domain`. Redelivery of the
    /// same Shopify order id converges to the last-applied values rather than inserting twice.
    pub async fn apply_order_created(
        &self,
        shop_domain: &str,
        order: NewOrder,
    ) -> Result<WebhookOutcome, StoreError> {
        let Some(tenant) = self.db.fetch_tenant_by_domain(shop_domain).await? else {
            warn!("🧾️ Ignoring order {}: no tenant matches domain {shop_domain}", order.shopify_order_id);
            return Ok(WebhookOutcome::UnknownTenant);
        };
        let order = self.db.upsert_order(tenant.id, order).await?;
        info!("🧾️ Processed order webhook for Shopify order {}", order.shopify_order_id);
        self.hub.notify();
        Ok(WebhookOutcome::Applied(order))
    }
}

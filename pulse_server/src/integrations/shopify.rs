//! Conversions from Shopify Admin API resources into store rows.
//!
//! Prices arrive as decimal strings and are parsed into [`Money`] here; a price that does not
//! parse is a conversion error, never a silent zero. Timestamps are a different matter: an order
//! whose `created_at` is missing or unreadable is still worth storing, it just never lands in a
//! date bucket, so those degrade to `None` with a warning instead of failing the conversion.
use chrono::{DateTime, Utc};
use log::*;
use pulse_common::Money;
use pulse_engine::db_types::{NewCustomer, NewOrder, NewProduct};
use shopify_client::{ShopifyCustomer, ShopifyOrder, ShopifyProduct};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Could not convert the Shopify record into a store row. {0}")]
pub struct ConversionError(pub String);

pub fn new_order_from_shopify_order(value: ShopifyOrder) -> Result<NewOrder, ConversionError> {
    trace!("Converting ShopifyOrder to NewOrder: {value:?}");
    let total_price = value
        .total_price
        .parse::<Money>()
        .map_err(|e| ConversionError(format!("Order {} has an invalid total_price. {e}", value.id)))?;
    let shopify_created_at = value.created_at.as_deref().and_then(|ts| match ts.parse::<DateTime<Utc>>() {
        Ok(ts) => Some(ts),
        Err(e) => {
            warn!("🛍️️ Order {} has an unreadable created_at ({ts}). It will not appear in date buckets. {e}", value.id);
            None
        },
    });
    Ok(NewOrder { shopify_order_id: value.id, total_price, currency: value.currency, shopify_created_at })
}

/// The product's display price is the first variant's price. A product with no variants at all
/// cannot be priced and is a conversion error.
pub fn new_product_from_shopify_product(value: ShopifyProduct) -> Result<NewProduct, ConversionError> {
    trace!("Converting ShopifyProduct to NewProduct: {value:?}");
    let variant =
        value.variants.first().ok_or_else(|| ConversionError(format!("Product {} has no variants", value.id)))?;
    let price = variant
        .price
        .parse::<Money>()
        .map_err(|e| ConversionError(format!("Product {} has an invalid variant price. {e}", value.id)))?;
    Ok(NewProduct { shopify_product_id: value.id, title: value.title, price })
}

pub fn new_customer_from_shopify_customer(value: ShopifyCustomer) -> Result<NewCustomer, ConversionError> {
    trace!("Converting ShopifyCustomer to NewCustomer: {value:?}");
    // Shopify omits total_spent for brand-new customers; that genuinely means zero spend.
    let total_spent = value
        .total_spent
        .as_deref()
        .unwrap_or("0")
        .parse::<Money>()
        .map_err(|e| ConversionError(format!("Customer {} has an invalid total_spent. {e}", value.id)))?;
    Ok(NewCustomer {
        shopify_customer_id: value.id,
        email: value.email,
        first_name: value.first_name,
        last_name: value.last_name,
        total_spent,
    })
}

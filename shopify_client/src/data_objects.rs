use serde::{Deserialize, Serialize};

/// The subset of the Shopify product resource the sync cares about. Prices are decimal strings on
/// the wire and live on variants; the first variant carries the display price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyProduct {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: i64,
    pub price: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyCustomer {
    pub id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Lifetime spend as a decimal string. Shopify omits it for brand-new customers.
    #[serde(default)]
    pub total_spent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyOrder {
    pub id: i64,
    pub total_price: String,
    pub currency: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

use log::*;
use pulse_common::Secret;

#[derive(Debug, Clone, Default)]
pub struct ShopifyConfig {
    /// The storefront domain, e.g. "my-shop.myshopify.com".
    pub shop: String,
    pub api_version: String,
    pub admin_access_token: Secret<String>,
}

impl ShopifyConfig {
    pub fn new_from_env_or_default() -> Self {
        let shop = std::env::var("PULSE_SHOPIFY_SHOP").unwrap_or_else(|_| {
            warn!("PULSE_SHOPIFY_SHOP not set, using (probably useless) default");
            "example.myshopify.com".to_string()
        });
        let api_version = std::env::var("PULSE_SHOPIFY_API_VERSION").unwrap_or_else(|_| {
            warn!("PULSE_SHOPIFY_API_VERSION not set, using 2024-07 as default");
            "2024-07".to_string()
        });
        let admin_access_token =
            Secret::new(std::env::var("PULSE_SHOPIFY_ADMIN_ACCESS_TOKEN").unwrap_or_else(|_| {
                warn!("PULSE_SHOPIFY_ADMIN_ACCESS_TOKEN not set, using (probably useless) default");
                "shpat_00000000000000".to_string()
            }));
        Self { shop, api_version, admin_access_token }
    }
}

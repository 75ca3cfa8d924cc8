use std::env;

use log::*;
use pulse_common::Secret;
use shopify_client::ShopifyConfig as ShopifyApiConfig;

const DEFAULT_PULSE_HOST: &str = "127.0.0.1";
const DEFAULT_PULSE_PORT: u16 = 4000;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Origin of the dashboard frontend, used for the CORS allow-list and unset in development,
    /// where any origin is accepted.
    pub frontend_url: Option<String>,
    /// Shopify storefront configuration
    pub shopify_config: ShopifyConfig,
}

#[derive(Clone, Debug, Default)]
pub struct ShopifyConfig {
    /// The url for the shopify storefront to use. e.g. "my-shop.myshopify.com"
    pub shop: String,
    pub api_version: String,
    pub admin_access_token: Secret<String>,
    /// The webhook signing secret. Webhook deliveries are rejected when the signature does not
    /// match, and rejected outright when this is empty.
    pub hmac_secret: Secret<String>,
    pub hmac_checks: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PULSE_HOST.to_string(),
            port: DEFAULT_PULSE_PORT,
            database_url: String::default(),
            frontend_url: None,
            shopify_config: ShopifyConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PULSE_HOST").ok().unwrap_or_else(|| DEFAULT_PULSE_HOST.into());
        let port = env::var("PULSE_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for PULSE_PORT. {e} Using the default, {DEFAULT_PULSE_PORT}, \
                         instead."
                    );
                    DEFAULT_PULSE_PORT
                })
            })
            .ok()
            .unwrap_or(DEFAULT_PULSE_PORT);
        let database_url = env::var("PULSE_DATABASE_URL").unwrap_or_else(|_| {
            warn!("🪛️ PULSE_DATABASE_URL is not set. Using the default, sqlite://data/pulse_store.db, instead.");
            "sqlite://data/pulse_store.db".to_string()
        });
        let frontend_url = env::var("PULSE_FRONTEND_URL").ok();
        if frontend_url.is_none() {
            info!("🪛️ PULSE_FRONTEND_URL is not set. CORS will allow any origin.");
        }
        let shopify_config = ShopifyConfig::from_env_or_default();
        Self { host, port, database_url, frontend_url, shopify_config }
    }
}

impl ShopifyConfig {
    pub fn from_env_or_default() -> Self {
        let api = ShopifyApiConfig::new_from_env_or_default();
        let hmac_secret = env::var("PULSE_SHOPIFY_HMAC_SECRET").map(Secret::new).unwrap_or_else(|_| {
            error!(
                "🪛️ PULSE_SHOPIFY_HMAC_SECRET is not set. Webhook signatures cannot be verified, so every webhook \
                 delivery will be rejected."
            );
            Secret::new(String::default())
        });
        let hmac_checks = env::var("PULSE_SHOPIFY_HMAC_CHECKS")
            .map(|s| s == "1" || s.to_lowercase() == "true")
            .ok()
            .unwrap_or(true);
        if !hmac_checks {
            warn!("🪛️ Shopify HMAC checks are disabled. Webhook deliveries will NOT be authenticated.");
        }
        Self {
            shop: api.shop.clone(),
            api_version: api.api_version.clone(),
            admin_access_token: api.admin_access_token,
            hmac_secret,
            hmac_checks,
        }
    }

    /// The subset of this configuration the Admin REST client needs.
    pub fn api_config(&self) -> ShopifyApiConfig {
        ShopifyApiConfig {
            shop: self.shop.clone(),
            api_version: self.api_version.clone(),
            admin_access_token: self.admin_access_token.clone(),
        }
    }
}

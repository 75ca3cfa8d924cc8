//! A minimal client for the Shopify Admin REST API.
//!
//! The client covers exactly what the sync engine needs: fetching the complete product, customer
//! and order collections for one storefront. Collection fetches handle pagination internally and
//! either return the full collection or fail explicitly. Consumers that want to fake the upstream
//! (e.g. server endpoint tests) implement [`ShopifyReader`].
mod api;
mod config;
mod data_objects;
mod error;

pub use api::{ShopifyApi, ShopifyReader};
pub use config::ShopifyConfig;
pub use data_objects::{ProductVariant, ShopifyCustomer, ShopifyOrder, ShopifyProduct};
pub use error::ShopifyApiError;

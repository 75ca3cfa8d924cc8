use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::{
    config::ShopifyConfig,
    data_objects::{ShopifyCustomer, ShopifyOrder, ShopifyProduct},
    ShopifyApiError,
};

/// The collection fetches the sync engine relies on. Implementations must return the *complete*
/// collection or fail; a silently truncated page is never an acceptable result.
#[allow(async_fn_in_trait)]
pub trait ShopifyReader {
    async fn fetch_all_products(&self) -> Result<Vec<ShopifyProduct>, ShopifyApiError>;
    async fn fetch_all_customers(&self) -> Result<Vec<ShopifyCustomer>, ShopifyApiError>;
    async fn fetch_all_orders(&self) -> Result<Vec<ShopifyOrder>, ShopifyApiError>;
}

#[derive(Clone)]
pub struct ShopifyApi {
    config: ShopifyConfig,
    client: Arc<Client>,
}

/// Shopify caps REST collection pages at 250 items.
const PAGE_LIMIT: usize = 250;

impl ShopifyApi {
    pub fn new(config: ShopifyConfig) -> Result<Self, ShopifyApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(config.admin_access_token.reveal().as_str())
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        headers.insert("X-Shopify-Access-Token", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ShopifyApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    pub async fn rest_query<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        body: Option<B>,
    ) -> Result<T, ShopifyApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| ShopifyApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<T>().await.map_err(|e| ShopifyApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| ShopifyApiError::RestResponseError(e.to_string()))?;
            Err(ShopifyApiError::QueryError { status, message })
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("https://{}/admin/api/{}{path}", self.config.shop, self.config.api_version)
    }

    /// Walks a paginated collection endpoint with `since_id` paging until a short page signals the
    /// end of the collection. `id_of` must return the item's Shopify id so the cursor can advance.
    async fn fetch_collection<T, F>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
        id_of: F,
    ) -> Result<Vec<T>, ShopifyApiError>
    where
        T: DeserializeOwned,
        F: Fn(&T) -> i64,
    {
        #[derive(Deserialize)]
        struct Page<T> {
            #[serde(
                alias = "products",
                alias = "customers",
                alias = "orders",
                alias = "items"
            )]
            items: Vec<T>,
        }
        let limit = PAGE_LIMIT.to_string();
        let mut items: Vec<T> = vec![];
        let mut since_id = 0i64;
        loop {
            let since = since_id.to_string();
            let mut params = vec![("limit", limit.as_str()), ("since_id", since.as_str())];
            params.extend_from_slice(extra_params);
            let page = self.rest_query::<Page<T>, ()>(Method::GET, path, &params, None).await?;
            let count = page.items.len();
            since_id = page.items.iter().map(&id_of).max().unwrap_or(since_id);
            items.extend(page.items);
            if count < PAGE_LIMIT {
                break;
            }
        }
        Ok(items)
    }
}

impl ShopifyReader for ShopifyApi {
    async fn fetch_all_products(&self) -> Result<Vec<ShopifyProduct>, ShopifyApiError> {
        debug!("Fetching all products from {}", self.config.shop);
        let products = self.fetch_collection("/products.json", &[], |p: &ShopifyProduct| p.id).await?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    async fn fetch_all_customers(&self) -> Result<Vec<ShopifyCustomer>, ShopifyApiError> {
        debug!("Fetching all customers from {}", self.config.shop);
        let customers = self.fetch_collection("/customers.json", &[], |c: &ShopifyCustomer| c.id).await?;
        info!("Fetched {} customers", customers.len());
        Ok(customers)
    }

    async fn fetch_all_orders(&self) -> Result<Vec<ShopifyOrder>, ShopifyApiError> {
        debug!("Fetching all orders from {}", self.config.shop);
        let orders =
            self.fetch_collection("/orders.json", &[("status", "any")], |o: &ShopifyOrder| o.id).await?;
        info!("Fetched {} orders", orders.len());
        Ok(orders)
    }
}

//----------------------------------------------   Webhooks  ----------------------------------------------------

use actix_web::{web, HttpRequest, HttpResponse};
use log::*;
use pulse_engine::{IngestApi, InsightsBackend, WebhookOutcome};
use shopify_client::ShopifyOrder;

use crate::{
    data_objects::JsonResponse,
    errors::ServerError,
    integrations::shopify::new_order_from_shopify_order,
    route,
};

pub const TOPIC_HEADER: &str = "x-shopify-topic";
pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";
pub const ORDERS_CREATE_TOPIC: &str = "orders/create";

route!(shopify_webhook => Post "/webhook" impl InsightsBackend);
/// Route handler for Shopify webhook deliveries.
///
/// The HMAC middleware has already authenticated the delivery by the time this handler runs, so
/// everything from here on is about the payload itself:
/// * A body that is not valid JSON is a 400. The signature was valid, so this is a misbehaving
///   sender, not an attacker, and a retry of the same bytes can never succeed.
/// * A topic other than `orders/create` (matched case-insensitively) is acknowledged with a 200
///   and ignored. Shopify retries non-2xx deliveries, and there is nothing to retry here.
/// * A shop domain with no matching tenant is also acknowledged with a 200; rows are never
///   created for storefronts the server does not know.
/// * A store failure is a 500, which is exactly when a Shopify retry is wanted.
pub async fn shopify_webhook<B: InsightsBackend>(
    req: HttpRequest,
    body: web::Bytes,
    api: web::Data<IngestApi<B>>,
) -> Result<HttpResponse, ServerError> {
    trace!("🛍️️ Received webhook request: {}", req.uri());
    let topic = header_value(&req, TOPIC_HEADER).unwrap_or_default();
    let shop_domain = header_value(&req, SHOP_DOMAIN_HEADER).unwrap_or_default();
    let payload: serde_json::Value = serde_json::from_slice(&body).map_err(|e| {
        warn!("🛍️️ Webhook body from {shop_domain} is not valid JSON. {e}");
        ServerError::MalformedPayload(e.to_string())
    })?;
    if !topic.eq_ignore_ascii_case(ORDERS_CREATE_TOPIC) {
        debug!("🛍️️ Ignoring webhook with topic {topic} from {shop_domain}");
        return Ok(HttpResponse::Ok().json(JsonResponse::success(format!("Topic {topic} ignored."))));
    }
    let order: ShopifyOrder = serde_json::from_value(payload).map_err(|e| {
        warn!("🛍️️ Webhook body from {shop_domain} is not a valid order payload. {e}");
        ServerError::MalformedPayload(e.to_string())
    })?;
    let new_order = new_order_from_shopify_order(order)?;
    match api.apply_order_created(&shop_domain, new_order).await {
        Ok(WebhookOutcome::Applied(order)) => {
            info!("🛍️️ Order {} processed successfully.", order.shopify_order_id);
            Ok(HttpResponse::Ok().json(JsonResponse::success("Order processed successfully.")))
        },
        Ok(WebhookOutcome::UnknownTenant) => {
            Ok(HttpResponse::Ok().json(JsonResponse::success(format!("No tenant for {shop_domain}. Ignored."))))
        },
        Err(e) => {
            error!("🛍️️ Could not store webhook order. {e}");
            Err(ServerError::from(e))
        },
    }
}

fn header_value(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers().get(name).and_then(|v| v.to_str().ok()).map(|s| s.to_string())
}

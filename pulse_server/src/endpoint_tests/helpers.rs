use actix_web::{
    body::MessageBody,
    http::StatusCode,
    test,
    test::TestRequest,
    web::ServiceConfig,
    App,
};
use pulse_common::Secret;
use pulse_engine::db_types::{NewOrder, Order, Tenant};

use crate::{
    helpers::calculate_hmac,
    middleware::HmacMiddlewareFactory,
    shopify_routes::{SHOP_DOMAIN_HEADER, TOPIC_HEADER},
};

pub const HMAC_HEADER: &str = "x-shopify-hmac-sha256";
pub const WEBHOOK_SECRET: &str = "webhook-secret-do-not-reuse";
pub const TENANT_DOMAIN: &str = "pulse-test.myshopify.com";

pub fn tenant() -> Tenant {
    Tenant {
        id: 1,
        name: "Pulse test store".to_string(),
        shopify_domain: TENANT_DOMAIN.to_string(),
        shopify_access_token: "shpat_test".to_string(),
    }
}

pub fn order_row(tenant_id: i64, order: NewOrder) -> Order {
    Order {
        id: 100,
        shopify_order_id: order.shopify_order_id,
        total_price: order.total_price,
        currency: order.currency,
        shopify_created_at: order.shopify_created_at,
        tenant_id,
    }
}

/// Signs `body` the way Shopify does, so the middleware accepts it.
pub fn sign(body: &str) -> String {
    calculate_hmac(WEBHOOK_SECRET, body.as_bytes())
}

/// Posts `body` at `/webhook` behind the HMAC middleware, exactly as the live server wires it.
/// Middleware rejections surface as error responses, so the caller always gets a status code.
pub async fn post_webhook(
    signature: Option<&str>,
    topic: &str,
    domain: &str,
    body: &str,
    hmac_checks: bool,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, String) {
    let mut req = TestRequest::post()
        .uri("/webhook")
        .insert_header((TOPIC_HEADER, topic))
        .insert_header((SHOP_DOMAIN_HEADER, domain));
    if let Some(sig) = signature {
        req = req.insert_header((HMAC_HEADER, sig));
    }
    let req = req.set_payload(body.to_string()).to_request();
    let mw = HmacMiddlewareFactory::new(HMAC_HEADER, Secret::new(WEBHOOK_SECRET.to_string()), hmac_checks);
    let app = App::new().wrap(mw).configure(configure);
    let service = test::init_service(app).await;
    match test::try_call_service(&service, req).await {
        Ok(res) => {
            let (_, res) = res.into_parts();
            let status = res.status();
            let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
            (status, body)
        },
        Err(e) => (e.as_response_error().status_code(), e.to_string()),
    }
}

pub async fn get_request(path: &str, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::get().uri(path).to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    let (_, res) = test::call_service(&service, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

pub async fn post_request(path: &str, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    let req = TestRequest::post().uri(path).to_request();
    let app = App::new().configure(configure);
    let service = test::init_service(app).await;
    let (_, res) = test::call_service(&service, req).await.into_parts();
    let status = res.status();
    let body = String::from_utf8_lossy(&res.into_body().try_into_bytes().unwrap()).into_owned();
    (status, body)
}

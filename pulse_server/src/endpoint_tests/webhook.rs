use actix_web::{http::StatusCode, web::Data};
use pulse_engine::{events::ChangeHub, IngestApi, StoreError};

use super::{
    helpers::{order_row, post_webhook, sign, tenant, TENANT_DOMAIN},
    mocks::MockBackend,
};
use crate::shopify_routes::ShopifyWebhookRoute;

const ORDER_BODY: &str =
    r#"{"id": 820982911946154508, "total_price": "109.95", "currency": "USD", "created_at": "2024-01-05T10:15:00Z"}"#;

fn accepting_backend() -> MockBackend {
    let mut backend = MockBackend::new();
    backend.expect_fetch_tenant_by_domain().returning(|_| Ok(Some(tenant())));
    backend.expect_upsert_order().returning(|tenant_id, order| Ok(order_row(tenant_id, order)));
    backend
}

#[actix_web::test]
async fn signed_order_webhook_is_applied_and_broadcasts_once() {
    let hub = ChangeHub::new();
    let mut rx = hub.subscribe();
    let api = Data::new(IngestApi::new(accepting_backend(), hub));
    let sig = sign(ORDER_BODY);
    let (status, body) = post_webhook(Some(&sig), "orders/create", TENANT_DOMAIN, ORDER_BODY, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Order processed successfully"), "unexpected body: {body}");
    assert!(rx.try_recv().is_ok(), "an applied order must broadcast a data-changed hint");
    assert!(rx.try_recv().is_err(), "exactly one hint per applied order");
}

#[actix_web::test]
async fn topic_name_is_matched_case_insensitively() {
    let hub = ChangeHub::new();
    let api = Data::new(IngestApi::new(accepting_backend(), hub));
    let sig = sign(ORDER_BODY);
    let (status, body) = post_webhook(Some(&sig), "ORDERS/Create", TENANT_DOMAIN, ORDER_BODY, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Order processed successfully"), "unexpected body: {body}");
}

#[actix_web::test]
async fn tampered_signature_is_rejected_before_any_handler_runs() {
    // No expectations on the mock: any store call panics the test.
    let api = Data::new(IngestApi::new(MockBackend::new(), ChangeHub::new()));
    let mut sig = sign(ORDER_BODY);
    // Flip the first character of the valid signature.
    let flipped = if sig.starts_with('A') { "B" } else { "A" };
    sig.replace_range(0..1, flipped);
    let (status, _) = post_webhook(Some(&sig), "orders/create", TENANT_DOMAIN, ORDER_BODY, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn tampered_body_is_rejected() {
    let api = Data::new(IngestApi::new(MockBackend::new(), ChangeHub::new()));
    let sig = sign(ORDER_BODY);
    let tampered = ORDER_BODY.replace("109.95", "1.00");
    let (status, _) = post_webhook(Some(&sig), "orders/create", TENANT_DOMAIN, &tampered, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn missing_signature_is_rejected() {
    let api = Data::new(IngestApi::new(MockBackend::new(), ChangeHub::new()));
    let (status, _) = post_webhook(None, "orders/create", TENANT_DOMAIN, ORDER_BODY, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn disabled_hmac_checks_allow_unsigned_calls() {
    let hub = ChangeHub::new();
    let api = Data::new(IngestApi::new(accepting_backend(), hub));
    let (status, _) = post_webhook(None, "orders/create", TENANT_DOMAIN, ORDER_BODY, false, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn unhandled_topics_are_acknowledged_without_touching_the_store() {
    let hub = ChangeHub::new();
    let mut rx = hub.subscribe();
    let api = Data::new(IngestApi::new(MockBackend::new(), hub));
    let body = r#"{"id": 632910392, "title": "Updated title"}"#;
    let sig = sign(body);
    let (status, response) = post_webhook(Some(&sig), "products/update", TENANT_DOMAIN, body, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(response.contains("ignored"), "unexpected body: {response}");
    assert!(rx.try_recv().is_err(), "ignored topics must not broadcast");
}

#[actix_web::test]
async fn unknown_shop_domain_is_acknowledged_without_broadcast() {
    let mut backend = MockBackend::new();
    backend.expect_fetch_tenant_by_domain().returning(|_| Ok(None));
    let hub = ChangeHub::new();
    let mut rx = hub.subscribe();
    let api = Data::new(IngestApi::new(backend, hub));
    let sig = sign(ORDER_BODY);
    let (status, body) =
        post_webhook(Some(&sig), "orders/create", "stranger.myshopify.com", ORDER_BODY, true, move |cfg| {
            cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
        })
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No tenant"), "unexpected body: {body}");
    assert!(rx.try_recv().is_err(), "unknown tenants must not broadcast");
}

#[actix_web::test]
async fn signed_but_malformed_json_is_a_bad_request() {
    let api = Data::new(IngestApi::new(MockBackend::new(), ChangeHub::new()));
    let body = "definitely not json";
    let sig = sign(body);
    let (status, _) = post_webhook(Some(&sig), "orders/create", TENANT_DOMAIN, body, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn unparseable_price_is_a_bad_request() {
    let api = Data::new(IngestApi::new(MockBackend::new(), ChangeHub::new()));
    let body = r#"{"id": 1, "total_price": "lots", "currency": "USD"}"#;
    let sig = sign(body);
    let (status, _) = post_webhook(Some(&sig), "orders/create", TENANT_DOMAIN, body, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn store_failure_is_an_internal_error() {
    let mut backend = MockBackend::new();
    backend.expect_fetch_tenant_by_domain().returning(|_| Ok(Some(tenant())));
    backend.expect_upsert_order().returning(|_, _| Err(StoreError::DatabaseError(sqlx::Error::PoolTimedOut)));
    let hub = ChangeHub::new();
    let mut rx = hub.subscribe();
    let api = Data::new(IngestApi::new(backend, hub));
    let sig = sign(ORDER_BODY);
    let (status, _) = post_webhook(Some(&sig), "orders/create", TENANT_DOMAIN, ORDER_BODY, true, move |cfg| {
        cfg.app_data(api).service(ShopifyWebhookRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(rx.try_recv().is_err(), "failed writes must not broadcast");
}

use actix_web::{http::StatusCode, web::Data};
use mockall::predicate::eq;
use pulse_common::Money;
use pulse_engine::{
    db_types::{Customer, DateBucket, OverviewMetrics},
    MetricsApi,
    TOP_CUSTOMER_COUNT,
};

use super::{
    helpers::{get_request, tenant},
    mocks::MockBackend,
};
use crate::routes::{MetricsOverviewRoute, OrdersByDateRoute, TopCustomersRoute};

fn money(s: &str) -> Money {
    s.parse().unwrap()
}

#[actix_web::test]
async fn overview_reports_totals_in_camel_case() {
    let mut backend = MockBackend::new();
    backend.expect_fetch_first_tenant().returning(|| Ok(Some(tenant())));
    backend.expect_overview().with(eq(1)).returning(|_| {
        Ok(OverviewMetrics { total_customers: 6, total_orders: 3, total_revenue: money("179.00") })
    });
    let api = Data::new(MetricsApi::new(backend));
    let (status, body) = get_request("/metrics/overview", move |cfg| {
        cfg.app_data(api).service(MetricsOverviewRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"totalCustomers":6,"totalOrders":3,"totalRevenue":"179.00"}"#);
}

#[actix_web::test]
async fn overview_without_a_synced_tenant_is_not_found() {
    let mut backend = MockBackend::new();
    backend.expect_fetch_first_tenant().returning(|| Ok(None));
    let api = Data::new(MetricsApi::new(backend));
    let (status, body) = get_request("/metrics/overview", move |cfg| {
        cfg.app_data(api).service(MetricsOverviewRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.contains("Tenant not found"), "unexpected body: {body}");
}

#[actix_web::test]
async fn orders_by_date_preserves_ascending_order() {
    let mut backend = MockBackend::new();
    backend.expect_fetch_first_tenant().returning(|| Ok(Some(tenant())));
    backend.expect_orders_by_date().with(eq(1)).returning(|_| {
        Ok(vec![
            DateBucket { date: "2024-01-01".to_string(), orders: 2, revenue: money("80.00") },
            DateBucket { date: "2024-01-03".to_string(), orders: 1, revenue: money("99.00") },
        ])
    });
    let api = Data::new(MetricsApi::new(backend));
    let (status, body) = get_request("/metrics/orders-by-date", move |cfg| {
        cfg.app_data(api).service(OrdersByDateRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"[{"date":"2024-01-01","orders":2,"revenue":"80.00"},{"date":"2024-01-03","orders":1,"revenue":"99.00"}]"#
    );
}

#[actix_web::test]
async fn top_customers_requests_the_fixed_count() {
    let mut backend = MockBackend::new();
    backend.expect_fetch_first_tenant().returning(|| Ok(Some(tenant())));
    backend.expect_top_customers().with(eq(1), eq(TOP_CUSTOMER_COUNT)).returning(|_, _| {
        Ok(vec![Customer {
            id: 9,
            shopify_customer_id: 42,
            email: Some("pat@example.com".to_string()),
            first_name: Some("Pat".to_string()),
            last_name: None,
            total_spent: money("90.00"),
            tenant_id: 1,
        }])
    });
    let api = Data::new(MetricsApi::new(backend));
    let (status, body) = get_request("/metrics/top-customers", move |cfg| {
        cfg.app_data(api).service(TopCustomersRoute::<MockBackend>::new());
    })
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""totalSpent":"90.00""#), "unexpected body: {body}");
}

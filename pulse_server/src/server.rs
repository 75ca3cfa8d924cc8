use std::time::Duration;

use actix_cors::Cors;
use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use pulse_engine::{events::ChangeHub, IngestApi, MetricsApi, SqliteDatabase};
use shopify_client::ShopifyApi;

use crate::{
    config::ServerConfig,
    errors::ServerError,
    live::live_updates,
    middleware::HmacMiddlewareFactory,
    routes::{health, MetricsOverviewRoute, OrdersByDateRoute, TopCustomersRoute, TriggerSyncRoute},
    shopify_routes::ShopifyWebhookRoute,
    sync::SyncTarget,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let shopify = ShopifyApi::new(config.shopify_config.api_config())
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let hub = ChangeHub::new();
    let srv = create_server_instance(config, db, shopify, hub)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    shopify: ShopifyApi,
    hub: ChangeHub,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let ingest_api = IngestApi::new(db.clone(), hub.clone());
        let metrics_api = MetricsApi::new(db.clone());
        let sync_target = SyncTarget::from(&config.shopify_config);
        let cors = match &config.frontend_url {
            Some(origin) => Cors::default().allowed_origin(origin).allow_any_method().allow_any_header(),
            None => Cors::permissive(),
        };
        let app = App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("pulse::access_log"))
            .wrap(cors)
            .app_data(web::Data::new(ingest_api))
            .app_data(web::Data::new(metrics_api))
            .app_data(web::Data::new(db.clone()))
            .app_data(web::Data::new(shopify.clone()))
            .app_data(web::Data::new(sync_target))
            .app_data(web::Data::new(hub.clone()));
        // Webhook deliveries are authenticated by signature, not by session, so the whole scope
        // sits behind the HMAC middleware.
        let shopify_scope = web::scope("/shopify")
            .wrap(HmacMiddlewareFactory::new(
                "x-shopify-hmac-sha256",
                config.shopify_config.hmac_secret.clone(),
                config.shopify_config.hmac_checks,
            ))
            .service(ShopifyWebhookRoute::<SqliteDatabase>::new());
        let api_scope = web::scope("/api")
            .service(TriggerSyncRoute::<SqliteDatabase, ShopifyApi>::new())
            .service(MetricsOverviewRoute::<SqliteDatabase>::new())
            .service(OrdersByDateRoute::<SqliteDatabase>::new())
            .service(TopCustomersRoute::<SqliteDatabase>::new());
        app.service(health).service(shopify_scope).service(api_scope).route("/live", web::get().to(live_updates))
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    info!("🚀️ Server instance created");
    Ok(srv)
}

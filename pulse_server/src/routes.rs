//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current
//! thread will stop that worker from processing new requests. Any long, non-cpu-bound operation
//! (I/O, database calls, upstream API calls) must therefore be expressed as a future or an
//! asynchronous function, so worker threads can interleave other requests while it is pending.
use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use pulse_engine::{InsightsBackend, MetricsApi};
use shopify_client::ShopifyReader;

use crate::{
    data_objects::SyncResponse,
    errors::ServerError,
    sync::{run_full_sync, SyncTarget},
};

// Web-actix cannot handle generics in handlers, so it's implemented manually using the `route!` macro
#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().content_type("text/plain").body("👍️\n")
}

// ----------------------------------------------   Sync  ----------------------------------------------------
route!(trigger_sync => Post "/sync" impl InsightsBackend, ShopifyReader);
/// Route handler for the sync endpoint.
///
/// Pulls every product, customer and order from the configured Shopify store and upserts them into
/// the local store. Safe to call repeatedly; re-running converges on the same rows.
pub async fn trigger_sync<B, S>(
    db: web::Data<B>,
    shopify: web::Data<S>,
    target: web::Data<SyncTarget>,
) -> Result<HttpResponse, ServerError>
where
    B: InsightsBackend,
    S: ShopifyReader,
{
    info!("🔄️ Full sync requested for {}", target.shopify_domain);
    let report = run_full_sync(db.get_ref(), shopify.get_ref(), target.get_ref()).await.map_err(|e| {
        error!("🔄️ Sync failed. {e}");
        ServerError::from(e)
    })?;
    Ok(HttpResponse::Ok().json(SyncResponse::new("Sync completed successfully", &report)))
}

// ----------------------------------------------   Metrics  ----------------------------------------------------
route!(metrics_overview => Get "/metrics/overview" impl InsightsBackend);
/// Headline totals for the dashboard: customer count, order count and summed revenue.
pub async fn metrics_overview<B: InsightsBackend>(api: web::Data<MetricsApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received overview metrics request");
    let overview = api.overview().await?.ok_or_else(|| ServerError::NoRecordFound("Tenant not found".into()))?;
    Ok(HttpResponse::Ok().json(overview))
}

route!(orders_by_date => Get "/metrics/orders-by-date" impl InsightsBackend);
/// Order counts and revenue bucketed per calendar day, oldest first.
pub async fn orders_by_date<B: InsightsBackend>(api: web::Data<MetricsApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received orders-by-date request");
    let buckets = api.orders_by_date().await?.ok_or_else(|| ServerError::NoRecordFound("Tenant not found".into()))?;
    Ok(HttpResponse::Ok().json(buckets))
}

route!(top_customers => Get "/metrics/top-customers" impl InsightsBackend);
/// The highest-spending customers, descending by lifetime spend.
pub async fn top_customers<B: InsightsBackend>(api: web::Data<MetricsApi<B>>) -> Result<HttpResponse, ServerError> {
    trace!("💻️ Received top customers request");
    let customers = api.top_customers().await?.ok_or_else(|| ServerError::NoRecordFound("Tenant not found".into()))?;
    Ok(HttpResponse::Ok().json(customers))
}

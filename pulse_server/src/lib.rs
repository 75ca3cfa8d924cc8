//! # Storefront Pulse server
//! The HTTP face of Storefront Pulse. It is responsible for:
//! * Receiving webhook calls from Shopify, verifying their HMAC signatures and applying them to
//!   the local store.
//! * Serving the dashboard read APIs (overview, orders-by-date, top customers).
//! * Running the on-demand full sync against the Shopify Admin REST API.
//! * Pushing `data_updated` hints to dashboard clients over a websocket.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more
//! information.
//!
//! ## Routes
//! * `/health`: liveness check, returns 200 OK.
//! * `/shopify/webhook`: webhook receiver, wrapped in the HMAC middleware.
//! * `/api/sync`: triggers a full sync of products, customers and orders.
//! * `/api/metrics/overview`, `/api/metrics/orders-by-date`, `/api/metrics/top-customers`: the
//!   dashboard projections.
//! * `/live`: websocket endpoint emitting a `data_updated` text frame after every applied change.

pub mod config;
pub mod data_objects;
pub mod errors;
pub mod helpers;
pub mod integrations;
pub mod live;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod shopify_routes;
pub mod sync;

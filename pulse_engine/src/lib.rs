//! Storefront Pulse engine
//!
//! The engine owns the local commerce store and the ingestion core that keeps it current. It is
//! split into:
//! 1. Database management ([`mod@sqlite`] behind the [`CommerceStore`] and [`MetricsProjection`]
//!    traits). Callers never touch SQL directly; they go through the traits, which also gives the
//!    server a seam to mock in endpoint tests.
//! 2. The public APIs ([`IngestApi`] for applying webhook events, [`MetricsApi`] for the read-only
//!    dashboard projections).
//! 3. The [`events`] module: a process-wide broadcast hub that fans a zero-payload "data changed"
//!    hint out to every connected live subscriber after a successful webhook mutation.
mod api;
mod sqlite;
mod traits;

pub mod db_types;
pub mod events;

pub use api::{IngestApi, MetricsApi, WebhookOutcome, TOP_CUSTOMER_COUNT};
pub use sqlite::SqliteDatabase;
pub use traits::{CommerceStore, InsightsBackend, MetricsProjection, StoreError};

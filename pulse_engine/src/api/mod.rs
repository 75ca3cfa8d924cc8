//! The engine's public-facing APIs, generic over the backend traits.
mod ingest;
mod metrics;

pub use ingest::{IngestApi, WebhookOutcome};
pub use metrics::{MetricsApi, TOP_CUSTOMER_COUNT};

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::sync::SyncReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResponse {
    pub success: bool,
    pub message: String,
}

impl JsonResponse {
    pub fn success<S: Display>(message: S) -> Self {
        Self { success: true, message: message.to_string() }
    }

    pub fn failure<S: Display>(message: S) -> Self {
        Self { success: false, message: message.to_string() }
    }
}

/// Body of a successful `/api/sync` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
    pub products: usize,
    pub customers: usize,
    pub orders: usize,
    /// Records that could not be converted into store rows and were left out of the sync.
    pub skipped: usize,
}

impl SyncResponse {
    pub fn new<S: Display>(message: S, report: &SyncReport) -> Self {
        Self {
            message: message.to_string(),
            products: report.products,
            customers: report.customers,
            orders: report.orders,
            skipped: report.skipped,
        }
    }
}

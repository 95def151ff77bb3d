//! Contains the data models for API requests and responses.

use printlab_shared::{AlertItem, PrinterRecord};
use serde::{Deserialize, Serialize};

/// Response for `/api/v1/printers`. `active_jobs` counts the whole fleet
/// regardless of any status filter.
#[derive(Serialize, Debug)]
pub struct PrinterListResponse {
    pub printers: Vec<PrinterRecord>,
    pub active_jobs: usize,
}

/// Query string for `/api/v1/printers`, e.g. `?status=printing`.
#[derive(Deserialize, Debug, Default)]
pub struct PrinterListQuery {
    pub status: Option<String>,
}

/// Response for `/api/v1/alerts`.
#[derive(Serialize, Debug)]
pub struct AlertListResponse {
    pub alerts: Vec<AlertItem>,
}

/// Response for `/api/v1/health`.
#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Acknowledgement for requests that start work in the background.
#[derive(Serialize, Debug)]
pub struct AcceptedResponse {
    pub result: String,
}

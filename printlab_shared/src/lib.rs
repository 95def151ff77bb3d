// printlab_shared: record types, style tables, formatters and fixtures shared by the dashboard

pub mod fixtures;
pub mod format;
pub mod models;
pub mod style;

pub use models::{
    AlertItem, AlertSeverity, AlertStatus, BookingInfo, BookingState, ComplianceStatus,
    ParseStatusError, PrinterBookingStatus, PrinterRecord, PrinterStatus, NO_JOB,
};

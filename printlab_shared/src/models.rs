//! Records exchanged between the fleet store, the screens and the web API.
//!
//! Field names serialise in camelCase and enumerations in their lowercase wire
//! spelling so a browser front end can consume the JSON unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Job name used when a printer has no job loaded.
pub const NO_JOB: &str = "-";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status '{0}'")]
pub struct ParseStatusError(pub String);

/// Lifecycle state of a monitored printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterStatus {
    Printing,
    Idle,
    Error,
    Finished,
}

impl PrinterStatus {
    pub const ALL: [PrinterStatus; 4] = [
        PrinterStatus::Printing,
        PrinterStatus::Idle,
        PrinterStatus::Error,
        PrinterStatus::Finished,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrinterStatus::Printing => "printing",
            PrinterStatus::Idle => "idle",
            PrinterStatus::Error => "error",
            PrinterStatus::Finished => "finished",
        }
    }
}

impl fmt::Display for PrinterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrinterStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrinterStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// One monitored device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterRecord {
    pub id: String,
    pub name: String,
    pub status: PrinterStatus,
    pub job_name: String,
    /// Percent complete, 0-100.
    pub progress: f64,
    pub time_remaining: String,
    pub elapsed_time: String,
    pub nozzle_temp: f64,
    pub nozzle_target: f64,
    pub bed_temp: f64,
    pub bed_target: f64,
    pub material: String,
    /// Colour keyword, also used verbatim as a CSS colour for the swatch.
    pub color: String,
    /// Unacknowledged alerts raised by this printer.
    pub alerts: u32,
}

impl PrinterRecord {
    pub fn is_printing(&self) -> bool {
        self.status == PrinterStatus::Printing
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
    Pending,
}

/// A historical or active alert. The printer name is a copy taken when the
/// alert was raised, not a live reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertItem {
    pub id: String,
    pub timestamp: String,
    pub printer_id: String,
    pub printer_name: String,
    pub severity: AlertSeverity,
    pub message: String,
    pub status: AlertStatus,
}

impl AlertItem {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }
}

/// State of a reservation in the booking system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingState {
    Active,
    Completed,
    Cancelled,
}

/// A reservation as reported by the external booking system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInfo {
    pub booking_id: String,
    pub printer_id: String,
    pub user_name: String,
    /// ISO-8601 local timestamp.
    pub start_time: String,
    pub end_time: String,
    pub purpose: String,
    pub status: BookingState,
}

/// Relation between printer activity and the presence of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplianceStatus {
    WithBooking,
    WithoutBooking,
    Idle,
}

impl ComplianceStatus {
    pub const ALL: [ComplianceStatus; 3] = [
        ComplianceStatus::WithBooking,
        ComplianceStatus::WithoutBooking,
        ComplianceStatus::Idle,
    ];

    /// Printing with a reservation is compliant, printing without one is not,
    /// and a printer that is not printing is idle whatever its bookings.
    pub fn classify(is_printing: bool, has_booking: bool) -> Self {
        match (is_printing, has_booking) {
            (true, true) => ComplianceStatus::WithBooking,
            (true, false) => ComplianceStatus::WithoutBooking,
            (false, _) => ComplianceStatus::Idle,
        }
    }
}

/// The booking system's view of one printer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrinterBookingStatus {
    pub printer_id: String,
    pub printer_name: String,
    pub is_printing: bool,
    pub has_booking: bool,
    pub booking_status: ComplianceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_booking: Option<BookingInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_booking: Option<BookingInfo>,
    /// Percentage of time spent under a valid booking.
    pub utilization_rate: f64,
}

impl PrinterBookingStatus {
    /// Builds a status whose classification is derived from the activity flags.
    pub fn derive(
        printer_id: impl Into<String>,
        printer_name: impl Into<String>,
        is_printing: bool,
        current_booking: Option<BookingInfo>,
        utilization_rate: f64,
    ) -> Self {
        let has_booking = current_booking.is_some();
        Self {
            printer_id: printer_id.into(),
            printer_name: printer_name.into(),
            is_printing,
            has_booking,
            booking_status: ComplianceStatus::classify(is_printing, has_booking),
            current_booking,
            last_booking: None,
            utilization_rate,
        }
    }
}

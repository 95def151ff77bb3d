//! Exhaustive status → presentation tables.
//!
//! Every enumeration gets a `match` rather than a lookup map so that adding a
//! variant fails to compile until its style is defined.

use serde::Serialize;

use crate::models::{AlertSeverity, AlertStatus, ComplianceStatus, PrinterStatus};

/// Presentation of one enumeration value: a display label, the badge classes
/// used by the web front end and an accent colour for charts and kiosk bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Style {
    pub label: &'static str,
    pub class: &'static str,
    pub color: &'static str,
}

pub trait Styled {
    fn style(&self) -> Style;
}

impl Styled for PrinterStatus {
    fn style(&self) -> Style {
        match self {
            PrinterStatus::Printing => Style {
                label: "Printing",
                class: "bg-blue-100 text-blue-700 border-blue-200",
                color: "#3B82F6",
            },
            PrinterStatus::Idle => Style {
                label: "Idle",
                class: "bg-gray-100 text-gray-600 border-gray-200",
                color: "#9CA3AF",
            },
            PrinterStatus::Error => Style {
                label: "Error",
                class: "bg-red-100 text-red-700 border-red-200",
                color: "#EF4444",
            },
            PrinterStatus::Finished => Style {
                label: "Finished",
                class: "bg-green-100 text-green-700 border-green-200",
                color: "#10B981",
            },
        }
    }
}

impl Styled for AlertSeverity {
    fn style(&self) -> Style {
        match self {
            AlertSeverity::Critical => Style {
                label: "critical",
                class: "bg-red-100 text-red-700",
                color: "#EF4444",
            },
            AlertSeverity::Warning => Style {
                label: "warning",
                class: "bg-yellow-100 text-yellow-700",
                color: "#F59E0B",
            },
            AlertSeverity::Info => Style {
                label: "info",
                class: "bg-blue-100 text-blue-700",
                color: "#3B82F6",
            },
        }
    }
}

impl Styled for AlertStatus {
    fn style(&self) -> Style {
        match self {
            AlertStatus::Active => Style {
                label: "active",
                class: "text-red-500",
                color: "#EF4444",
            },
            AlertStatus::Resolved => Style {
                label: "resolved",
                class: "text-green-600",
                color: "#16A34A",
            },
            AlertStatus::Pending => Style {
                label: "pending",
                class: "text-lab-subtext",
                color: "#6B7280",
            },
        }
    }
}

impl Styled for ComplianceStatus {
    fn style(&self) -> Style {
        match self {
            ComplianceStatus::WithBooking => Style {
                label: "WITH BOOKING",
                class: "bg-green-50",
                color: "#22C55E",
            },
            ComplianceStatus::WithoutBooking => Style {
                label: "NO BOOKING",
                class: "bg-red-50",
                color: "#EF4444",
            },
            ComplianceStatus::Idle => Style {
                label: "IDLE",
                class: "bg-gray-50",
                color: "#9CA3AF",
            },
        }
    }
}

impl ComplianceStatus {
    /// Short explanation shown under the classification on a booking card.
    pub fn description(self) -> &'static str {
        match self {
            ComplianceStatus::WithBooking => "Properly booked usage",
            ComplianceStatus::WithoutBooking => "Unauthorized usage",
            ComplianceStatus::Idle => "Available for booking",
        }
    }

    /// Series name used in the compliance pie chart.
    pub fn chart_name(self) -> &'static str {
        match self {
            ComplianceStatus::WithBooking => "With Booking",
            ComplianceStatus::WithoutBooking => "Without Booking",
            ComplianceStatus::Idle => "Idle",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn printer_status_labels_are_distinct() {
        let labels: HashSet<_> = PrinterStatus::ALL.iter().map(|s| s.style().label).collect();
        assert_eq!(labels.len(), PrinterStatus::ALL.len());
    }

    #[test]
    fn compliance_colors_match_chart_palette() {
        assert_eq!(ComplianceStatus::WithBooking.style().color, "#22C55E");
        assert_eq!(ComplianceStatus::WithoutBooking.style().color, "#EF4444");
        assert_eq!(ComplianceStatus::Idle.style().color, "#9CA3AF");
    }
}

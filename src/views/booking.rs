// Booking compliance: printer activity cross-referenced with reservations.

use chrono::NaiveDateTime;
use printlab_shared::format::{format_minutes, round_display};
use printlab_shared::style::{Style, Styled};
use printlab_shared::{BookingInfo, ComplianceStatus, PrinterBookingStatus};
use serde::Serialize;

use super::{ChartSlice, mean};
use crate::booking::BookingFeed;
use crate::router::NavAction;

const UTILIZATION_COLOR: &str = "#7C3AED";

/// Counts per compliance class plus the rounded mean utilisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ComplianceSummary {
    pub total: usize,
    pub with_booking: usize,
    pub without_booking: usize,
    pub idle: usize,
    pub avg_utilization: i64,
}

impl ComplianceSummary {
    pub fn count(&self, status: ComplianceStatus) -> usize {
        match status {
            ComplianceStatus::WithBooking => self.with_booking,
            ComplianceStatus::WithoutBooking => self.without_booking,
            ComplianceStatus::Idle => self.idle,
        }
    }
}

pub fn summarize_compliance(statuses: &[PrinterBookingStatus]) -> ComplianceSummary {
    let count = |class: ComplianceStatus| statuses.iter().filter(|s| s.booking_status == class).count();
    ComplianceSummary {
        total: statuses.len(),
        with_booking: count(ComplianceStatus::WithBooking),
        without_booking: count(ComplianceStatus::WithoutBooking),
        idle: count(ComplianceStatus::Idle),
        avg_utilization: round_display(mean(statuses.iter().map(|s| s.utilization_rate))),
    }
}

/// `count / total` as a whole percent; 0 when there is nothing to divide by.
fn share(count: usize, total: usize) -> i64 {
    if total == 0 { 0 } else { round_display(count as f64 / total as f64 * 100.0) }
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusCard {
    pub title: &'static str,
    pub count: i64,
    pub total: i64,
    pub percentage: i64,
    pub color: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct UtilizationBar {
    pub name: String,
    pub rate: f64,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingWindow {
    pub user_name: String,
    pub purpose: String,
    /// `HH:MM - HH:MM`, or the raw timestamps when they do not parse.
    pub window: String,
    /// Reserved length such as `4h 0m`; `None` unless both ends parse and
    /// the end is not before the start.
    pub duration: Option<String>,
}

fn parse_booking_time(ts: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(ts, "%Y-%m-%dT%H:%M:%S").ok()
}

impl BookingWindow {
    fn new(booking: &BookingInfo) -> Self {
        let start = parse_booking_time(&booking.start_time);
        let end = parse_booking_time(&booking.end_time);
        let clock = |parsed: Option<NaiveDateTime>, raw: &str| match parsed {
            Some(t) => t.format("%H:%M").to_string(),
            None => raw.to_string(),
        };
        let duration = start
            .zip(end)
            .and_then(|(start, end)| u32::try_from((end - start).num_minutes()).ok())
            .map(format_minutes);
        Self {
            user_name: booking.user_name.clone(),
            purpose: booking.purpose.clone(),
            window: format!("{} - {}", clock(start, &booking.start_time), clock(end, &booking.end_time)),
            duration,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingCard {
    pub printer_id: String,
    pub printer_name: String,
    pub compliance: ComplianceStatus,
    pub style: Style,
    pub description: &'static str,
    pub activity: &'static str,
    pub booking: Option<BookingWindow>,
    pub utilization_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingScreen {
    pub loading: bool,
    pub last_updated: Option<String>,
    /// The feed comes from the built-in mock rather than the booking system.
    pub mock_data: bool,
    pub error: Option<String>,
    pub summary: ComplianceSummary,
    pub cards: Vec<StatusCard>,
    pub status_chart: Vec<ChartSlice>,
    pub utilization_chart: Vec<UtilizationBar>,
    pub printers: Vec<BookingCard>,
    pub on_refresh: &'static str,
    pub on_back: NavAction,
}

fn status_cards(summary: &ComplianceSummary) -> Vec<StatusCard> {
    let total = summary.total;
    let class_card = |title: &'static str, status: ComplianceStatus, description: &'static str| StatusCard {
        title,
        count: summary.count(status) as i64,
        total: total as i64,
        percentage: share(summary.count(status), total),
        color: status.style().color,
        description,
    };
    vec![
        class_card("With Booking", ComplianceStatus::WithBooking, "Properly authorized"),
        class_card("Without Booking", ComplianceStatus::WithoutBooking, "Unauthorized usage"),
        class_card("Idle & Booked", ComplianceStatus::Idle, "Reserved but not in use"),
        StatusCard {
            title: "Avg Utilization",
            count: summary.avg_utilization,
            total: 100,
            percentage: summary.avg_utilization,
            color: UTILIZATION_COLOR,
            description: "Booking compliance rate",
        },
    ]
}

pub fn booking_screen(feed: &BookingFeed, mock_data: bool) -> BookingScreen {
    let summary = summarize_compliance(&feed.statuses);
    let status_chart = ComplianceStatus::ALL
        .into_iter()
        .map(|status| ChartSlice {
            name: status.chart_name().to_string(),
            value: summary.count(status) as f64,
            color: status.style().color,
        })
        .filter(|slice| slice.value > 0.0)
        .collect();
    let utilization_chart = feed
        .statuses
        .iter()
        .map(|s| UtilizationBar {
            name: s.printer_name.trim_start_matches("Bambu ").to_string(),
            rate: s.utilization_rate,
            fill: s.booking_status.style().color,
        })
        .collect();
    let printers = feed
        .statuses
        .iter()
        .map(|s| BookingCard {
            printer_id: s.printer_id.clone(),
            printer_name: s.printer_name.clone(),
            compliance: s.booking_status,
            style: s.booking_status.style(),
            description: s.booking_status.description(),
            activity: if s.is_printing { "PRINTING" } else { "IDLE" },
            booking: s.current_booking.as_ref().map(BookingWindow::new),
            utilization_rate: s.utilization_rate,
        })
        .collect();

    BookingScreen {
        loading: feed.loading,
        last_updated: feed.last_updated.map(|t| t.format("%H:%M:%S").to_string()),
        mock_data,
        error: feed.last_error.as_ref().map(|e| e.to_string()),
        cards: status_cards(&summary),
        summary,
        status_chart,
        utilization_chart,
        printers,
        on_refresh: "/api/v1/booking/refresh",
        on_back: NavAction::Back,
    }
}

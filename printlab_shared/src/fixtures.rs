//! Hand-authored datasets standing in for live printer, alert and booking feeds.

use crate::models::{
    AlertItem, AlertSeverity, AlertStatus, BookingInfo, BookingState, ComplianceStatus,
    PrinterBookingStatus, PrinterRecord, PrinterStatus, NO_JOB,
};

#[allow(clippy::too_many_arguments)]
fn printer(
    id: &str,
    name: &str,
    status: PrinterStatus,
    job_name: &str,
    progress: f64,
    time_remaining: &str,
    elapsed_time: &str,
    nozzle: (f64, f64),
    bed: (f64, f64),
    material: &str,
    color: &str,
    alerts: u32,
) -> PrinterRecord {
    PrinterRecord {
        id: id.to_string(),
        name: name.to_string(),
        status,
        job_name: job_name.to_string(),
        progress,
        time_remaining: time_remaining.to_string(),
        elapsed_time: elapsed_time.to_string(),
        nozzle_temp: nozzle.0,
        nozzle_target: nozzle.1,
        bed_temp: bed.0,
        bed_target: bed.1,
        material: material.to_string(),
        color: color.to_string(),
        alerts,
    }
}

/// The fleet as it looks when the dashboard starts.
pub fn initial_printers() -> Vec<PrinterRecord> {
    use PrinterStatus::*;
    vec![
        printer("p1", "Bambu A1", Printing, "Housing_V2.stl", 65.0, "1h 20m", "2h 10m", (215.0, 215.0), (60.0, 60.0), "PLA", "Red", 0),
        printer("p2", "Bambu A2", Idle, NO_JOB, 0.0, "-", "-", (24.0, 0.0), (24.0, 0.0), "PETG", "Clear", 0),
        printer("p3", "Bambu A3", Error, "Gear_Shift.gcode", 12.0, "Stalled", "15m", (180.0, 200.0), (60.0, 60.0), "ABS", "Black", 2),
        printer("p4", "Bambu A4", Printing, "Bracket_Support.stl", 89.0, "12m", "4h 05m", (250.0, 250.0), (90.0, 90.0), "ASA", "Blue", 0),
        printer("p5", "Bambu A5", Finished, "Test_Cube.gcode", 100.0, "Done", "45m", (35.0, 0.0), (30.0, 0.0), "PLA", "White", 1),
    ]
}

fn alert(
    id: &str,
    timestamp: &str,
    printer_id: &str,
    printer_name: &str,
    severity: AlertSeverity,
    message: &str,
    status: AlertStatus,
) -> AlertItem {
    AlertItem {
        id: id.to_string(),
        timestamp: timestamp.to_string(),
        printer_id: printer_id.to_string(),
        printer_name: printer_name.to_string(),
        severity,
        message: message.to_string(),
        status,
    }
}

pub fn mock_alerts() -> Vec<AlertItem> {
    vec![
        alert("a1", "10:42 AM", "p3", "Lab-Printer-B1", AlertSeverity::Critical, "Thermal Runaway Detected", AlertStatus::Active),
        alert("a2", "09:15 AM", "p5", "Lab-Printer-C1", AlertSeverity::Warning, "Filament Runout", AlertStatus::Resolved),
        alert("a3", "Yesterday", "p2", "Lab-Printer-A2", AlertSeverity::Info, "Firmware Update Available", AlertStatus::Pending),
    ]
}

fn booking(id: &str, printer_id: &str, user: &str, start: &str, end: &str, purpose: &str) -> BookingInfo {
    BookingInfo {
        booking_id: id.to_string(),
        printer_id: printer_id.to_string(),
        user_name: user.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        purpose: purpose.to_string(),
        status: BookingState::Active,
    }
}

/// Reservations as the booking system would report them.
pub fn mock_bookings() -> Vec<BookingInfo> {
    vec![
        booking("BK-2024-001", "p1", "John Doe", "2024-02-11T08:00:00", "2024-02-11T12:00:00", "Thesis prototype printing"),
        booking("BK-2024-002", "p3", "Jane Smith", "2024-02-11T09:00:00", "2024-02-11T11:00:00", "Research project housing"),
        booking("BK-2024-003", "p4", "Mike Johnson", "2024-02-11T10:00:00", "2024-02-11T14:00:00", "Drone parts"),
        booking("BK-2024-004", "p2", "Sarah Lee", "2024-02-11T13:00:00", "2024-02-11T15:00:00", "Mechanical gripper"),
    ]
}

/// Printer activity cross-matched with [`mock_bookings`].
pub fn mock_printer_booking_status() -> Vec<PrinterBookingStatus> {
    let bookings = mock_bookings();
    let find = |printer_id: &str| bookings.iter().find(|b| b.printer_id == printer_id).cloned();
    vec![
        PrinterBookingStatus::derive("p1", "Bambu A1", true, find("p1"), 85.0),
        PrinterBookingStatus::derive("p2", "Bambu A2", false, find("p2"), 60.0),
        PrinterBookingStatus::derive("p3", "Bambu A3", true, find("p3"), 45.0),
        PrinterBookingStatus::derive("p4", "Bambu A4", true, find("p4"), 90.0),
        PrinterBookingStatus {
            printer_id: "p5".to_string(),
            printer_name: "Bambu A5".to_string(),
            is_printing: false,
            has_booking: false,
            booking_status: ComplianceStatus::Idle,
            current_booking: None,
            last_booking: None,
            utilization_rate: 30.0,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printer_ids_are_unique_and_ordered() {
        let ids: Vec<_> = initial_printers().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["p1", "p2", "p3", "p4", "p5"]);
    }

    #[test]
    fn fixture_progress_is_in_range() {
        assert!(initial_printers().iter().all(|p| (0.0..=100.0).contains(&p.progress)));
    }

    #[test]
    fn compliance_fixture_classifies_as_booked() {
        let statuses = mock_printer_booking_status();
        let booked = statuses
            .iter()
            .filter(|s| s.booking_status == ComplianceStatus::WithBooking)
            .count();
        assert_eq!(booked, 3);
        assert_eq!(statuses[1].current_booking.as_ref().map(|b| b.booking_id.as_str()), Some("BK-2024-004"));
    }
}

// Fleet overview: one card per printer.

use printlab_shared::format::{format_percent, format_temp, truncate};
use printlab_shared::style::{Style, Styled};
use printlab_shared::{PrinterRecord, PrinterStatus};
use serde::Serialize;

use crate::router::NavAction;

const JOB_NAME_WIDTH: usize = 24;

#[derive(Debug, Clone, Serialize)]
pub struct PrinterCard {
    pub id: String,
    pub name: String,
    pub status: PrinterStatus,
    pub badge: Style,
    pub progress_label: String,
    /// Bar width in percent of the track.
    pub progress_width: f64,
    pub job_name: String,
    pub time_remaining: String,
    pub nozzle_label: String,
    pub material: String,
    pub alerts: u32,
    /// Error printers get a red icon and bar.
    pub highlight_error: bool,
    pub on_select: NavAction,
}

#[derive(Debug, Clone, Serialize)]
pub struct FleetSummary {
    pub active_jobs: usize,
    pub total_printers: usize,
    pub cards: Vec<PrinterCard>,
    pub on_view_alerts: NavAction,
}

fn card(printer: &PrinterRecord) -> PrinterCard {
    PrinterCard {
        id: printer.id.clone(),
        name: printer.name.clone(),
        status: printer.status,
        badge: printer.status.style(),
        progress_label: format_percent(printer.progress),
        progress_width: printer.progress,
        job_name: truncate(&printer.job_name, JOB_NAME_WIDTH),
        time_remaining: printer.time_remaining.clone(),
        nozzle_label: format!("Nozzle: {}", format_temp(printer.nozzle_temp)),
        material: printer.material.clone(),
        alerts: printer.alerts,
        highlight_error: printer.status == PrinterStatus::Error,
        on_select: NavAction::SelectPrinter {
            printer_id: printer.id.clone(),
        },
    }
}

pub fn active_job_count(printers: &[PrinterRecord]) -> usize {
    printers.iter().filter(|p| p.is_printing()).count()
}

pub fn fleet_summary(printers: &[PrinterRecord]) -> FleetSummary {
    FleetSummary {
        active_jobs: active_job_count(printers),
        total_printers: printers.len(),
        cards: printers.iter().map(card).collect(),
        on_view_alerts: NavAction::ViewAlerts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printlab_shared::fixtures::initial_printers;
    use printlab_shared::format::round_display;

    #[test]
    fn test_active_jobs_counts_printing() {
        let summary = fleet_summary(&initial_printers());
        assert_eq!(summary.active_jobs, 2);
        assert_eq!(summary.total_printers, 5);
        assert_eq!(summary.cards.len(), 5);
    }

    #[test]
    fn test_card_rounds_temperature_and_progress() {
        let mut printers = initial_printers();
        printers[0].nozzle_temp = 215.4;
        printers[0].progress = 65.5;
        let summary = fleet_summary(&printers);
        let first = &summary.cards[0];
        assert_eq!(first.nozzle_label, "Nozzle: 215°C");
        assert_eq!(first.progress_label, "66%");
        assert_eq!(first.progress_width, 65.5);
        assert_eq!(first.badge.label, "Printing");
        assert_eq!(round_display(first.progress_width), 66);
    }

    #[test]
    fn test_card_select_carries_id() {
        let summary = fleet_summary(&initial_printers());
        assert_eq!(
            summary.cards[2].on_select,
            NavAction::SelectPrinter { printer_id: "p3".to_string() }
        );
        assert!(summary.cards[2].highlight_error);
    }
}

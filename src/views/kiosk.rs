// Kiosk visualization: unattended full-screen fleet dashboard.

use chrono::{DateTime, Local};
use printlab_shared::format::round_display;
use printlab_shared::style::Styled;
use printlab_shared::{PrinterRecord, PrinterStatus};
use serde::Serialize;

use super::{ChartSlice, mean};
use crate::router::NavAction;

#[derive(Debug, Clone, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub unit: String,
    pub color: &'static str,
    pub subtext: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusBar {
    pub id: String,
    pub name: String,
    pub status: PrinterStatus,
    pub color: &'static str,
    pub progress: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActiveJob {
    pub id: String,
    pub name: String,
    pub job_name: String,
    pub progress: i64,
    pub time_remaining: String,
    pub nozzle_temp: i64,
    pub material: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct KioskScreen {
    pub title: String,
    pub time: String,
    pub date: String,
    pub active_jobs: usize,
    pub fleet_size: usize,
    pub finished: usize,
    pub error_count: usize,
    pub total_alerts: u32,
    pub avg_progress: i64,
    pub avg_nozzle_temp: i64,
    pub cards: Vec<StatCard>,
    pub status_breakdown: Vec<ChartSlice>,
    pub material_breakdown: Vec<ChartSlice>,
    pub status_bars: Vec<StatusBar>,
    pub printing: Vec<ActiveJob>,
    pub on_exit: NavAction,
}

const MATERIAL_PALETTE: [&str; 6] = ["#3B82F6", "#8B5CF6", "#F59E0B", "#10B981", "#EF4444", "#6B7280"];

fn count_status(printers: &[PrinterRecord], status: PrinterStatus) -> usize {
    printers.iter().filter(|p| p.status == status).count()
}

fn material_breakdown(printers: &[PrinterRecord]) -> Vec<ChartSlice> {
    let mut slices: Vec<ChartSlice> = Vec::new();
    for printer in printers {
        match slices.iter_mut().find(|s| s.name == printer.material) {
            Some(slice) => slice.value += 1.0,
            None => {
                let color = MATERIAL_PALETTE[slices.len() % MATERIAL_PALETTE.len()];
                slices.push(ChartSlice {
                    name: printer.material.clone(),
                    value: 1.0,
                    color,
                });
            }
        }
    }
    slices
}

/// Builds the kiosk screen for `printers` as of `now`. An empty fleet yields
/// zero averages rather than NaN.
pub fn kiosk_screen(printers: &[PrinterRecord], now: DateTime<Local>, title: &str) -> KioskScreen {
    let active_jobs = count_status(printers, PrinterStatus::Printing);
    let error_count = count_status(printers, PrinterStatus::Error);
    let finished = count_status(printers, PrinterStatus::Finished);
    let avg_progress = round_display(mean(printers.iter().map(|p| p.progress)));
    let avg_nozzle_temp = round_display(mean(printers.iter().map(|p| p.nozzle_temp)));
    let total_alerts: u32 = printers.iter().map(|p| p.alerts).sum();

    let health = if error_count > 0 {
        StatCard {
            title: "Alerts",
            value: error_count.to_string(),
            unit: "ERRORS".to_string(),
            color: "#EF4444",
            subtext: String::new(),
        }
    } else {
        StatCard {
            title: "System Status",
            value: "OK".to_string(),
            unit: String::new(),
            color: "#10B981",
            subtext: String::new(),
        }
    };
    let health = StatCard {
        subtext: if total_alerts > 0 {
            format!("{} warnings pending", total_alerts)
        } else {
            "All systems normal".to_string()
        },
        ..health
    };

    let cards = vec![
        StatCard {
            title: "Active Jobs",
            value: active_jobs.to_string(),
            unit: format!("/ {}", printers.len()),
            color: "#3B82F6",
            subtext: format!("{} completed today", finished),
        },
        StatCard {
            title: "Avg Progress",
            value: avg_progress.to_string(),
            unit: "%".to_string(),
            color: "#8B5CF6",
            subtext: "Fleet average".to_string(),
        },
        StatCard {
            title: "Avg Nozzle Temp",
            value: avg_nozzle_temp.to_string(),
            unit: "°C".to_string(),
            color: "#F59E0B",
            subtext: "Across all printers".to_string(),
        },
        health,
    ];

    let status_breakdown = PrinterStatus::ALL
        .into_iter()
        .map(|status| ChartSlice {
            name: status.style().label.to_string(),
            value: count_status(printers, status) as f64,
            color: status.style().color,
        })
        .filter(|slice| slice.value > 0.0)
        .collect();

    KioskScreen {
        title: title.to_string(),
        time: now.format("%H:%M").to_string(),
        date: now.format("%A, %B %-d").to_string(),
        active_jobs,
        fleet_size: printers.len(),
        finished,
        error_count,
        total_alerts,
        avg_progress,
        avg_nozzle_temp,
        cards,
        status_breakdown,
        material_breakdown: material_breakdown(printers),
        status_bars: printers
            .iter()
            .map(|p| StatusBar {
                id: p.id.clone(),
                name: p.name.clone(),
                status: p.status,
                color: p.status.style().color,
                progress: p.progress,
            })
            .collect(),
        printing: printers
            .iter()
            .filter(|p| p.is_printing())
            .map(|p| ActiveJob {
                id: p.id.clone(),
                name: p.name.clone(),
                job_name: p.job_name.clone(),
                progress: round_display(p.progress),
                time_remaining: p.time_remaining.clone(),
                nozzle_temp: round_display(p.nozzle_temp),
                material: p.material.clone(),
            })
            .collect(),
        on_exit: NavAction::Back,
    }
}

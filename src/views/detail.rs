// Printer detail: full telemetry for a single record.

use printlab_shared::format::{format_percent, round_display};
use printlab_shared::style::{Style, Styled};
use printlab_shared::{PrinterRecord, PrinterStatus};
use serde::Serialize;
use std::str::FromStr;
use thiserror::Error;

use crate::router::NavAction;

/// Full-scale reading of the nozzle gauge.
pub const NOZZLE_SCALE_MAX: f64 = 300.0;
/// Full-scale reading of the bed gauge.
pub const BED_SCALE_MAX: f64 = 120.0;

/// Fan speeds are not reported by the fleet feed; the panel shows fixed values.
const FAN_READINGS: [(&str, u8); 2] = [("Part Cooling", 85), ("Hotend", 100)];

/// CSS colour keywords a swatch can render. Anything else shows a blank swatch.
const CSS_COLOR_KEYWORDS: &[&str] = &[
    "black", "white", "red", "green", "blue", "yellow", "orange", "purple", "pink", "gray", "grey",
    "brown", "cyan", "magenta", "silver", "gold", "navy", "teal", "olive", "maroon", "lime",
    "transparent",
];

#[derive(Debug, Clone, Serialize)]
pub struct TemperatureGauge {
    pub current: i64,
    pub target: f64,
    pub label: String,
    /// `current / scale * 100`. Not clamped: readings above the scale overflow the bar.
    pub fill_percent: f64,
}

impl TemperatureGauge {
    fn new(current: f64, target: f64, scale_max: f64) -> Self {
        Self {
            current: round_display(current),
            target,
            label: format!("{} / {}°C", round_display(current), target),
            fill_percent: current / scale_max * 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColorSwatch {
    pub name: String,
    /// `None` when the colour name is not a CSS keyword.
    pub css: Option<String>,
}

impl ColorSwatch {
    pub fn new(name: &str) -> Self {
        let lower = name.trim().to_ascii_lowercase();
        let css = CSS_COLOR_KEYWORDS.contains(&lower.as_str()).then_some(lower);
        if css.is_none() {
            tracing::debug!("Colour '{}' is not a CSS keyword, swatch left blank", name);
        }
        Self {
            name: name.to_string(),
            css,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FanReading {
    pub label: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrinterControl {
    Pause,
    Resume,
    Stop,
}

impl PrinterControl {
    pub const ALL: [PrinterControl; 3] = [PrinterControl::Pause, PrinterControl::Resume, PrinterControl::Stop];

    pub fn as_str(self) -> &'static str {
        match self {
            PrinterControl::Pause => "pause",
            PrinterControl::Resume => "resume",
            PrinterControl::Stop => "stop",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown printer control '{0}'")]
pub struct UnknownControl(pub String);

impl FromStr for PrinterControl {
    type Err = UnknownControl;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrinterControl::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownControl(s.to_string()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlButton {
    pub control: PrinterControl,
    /// Printer control is not connected to any device; always false.
    pub wired: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PrinterDetail {
    pub id: String,
    pub name: String,
    pub status: PrinterStatus,
    pub badge: Style,
    pub job_name: String,
    pub progress_label: String,
    pub progress_width: f64,
    pub elapsed_time: String,
    pub time_remaining: String,
    pub nozzle: TemperatureGauge,
    pub bed: TemperatureGauge,
    pub material: String,
    pub color: ColorSwatch,
    pub fans: Vec<FanReading>,
    pub controls: Vec<ControlButton>,
    pub on_back: NavAction,
}

/// Detail panel for `printer`; `None` renders nothing.
pub fn printer_detail(printer: Option<&PrinterRecord>) -> Option<PrinterDetail> {
    let printer = printer?;
    Some(PrinterDetail {
        id: printer.id.clone(),
        name: printer.name.clone(),
        status: printer.status,
        badge: printer.status.style(),
        job_name: printer.job_name.clone(),
        progress_label: format_percent(printer.progress),
        progress_width: printer.progress,
        elapsed_time: printer.elapsed_time.clone(),
        time_remaining: printer.time_remaining.clone(),
        nozzle: TemperatureGauge::new(printer.nozzle_temp, printer.nozzle_target, NOZZLE_SCALE_MAX),
        bed: TemperatureGauge::new(printer.bed_temp, printer.bed_target, BED_SCALE_MAX),
        material: printer.material.clone(),
        color: ColorSwatch::new(&printer.color),
        fans: FAN_READINGS
            .iter()
            .map(|&(label, percent)| FanReading { label, percent })
            .collect(),
        controls: PrinterControl::ALL
            .into_iter()
            .map(|control| ControlButton { control, wired: false })
            .collect(),
        on_back: NavAction::Back,
    })
}

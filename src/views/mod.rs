//! Screen view models.
//!
//! Every screen is a pure function of its input. The returned structs are
//! what the web API serialises; a front end only has to draw them.

pub mod alerts;
pub mod booking;
pub mod detail;
pub mod fleet;
pub mod kiosk;

use serde::Serialize;

use crate::router::{NavAction, View};

pub use alerts::{AlertsScreen, alerts_screen};
pub use booking::{BookingScreen, ComplianceSummary, booking_screen, summarize_compliance};
pub use detail::{PrinterDetail, printer_detail};
pub use fleet::{FleetSummary, fleet_summary};
pub use kiosk::{KioskScreen, kiosk_screen};

pub const APP_NAME: &str = "PrintLab OS";

/// One slice of a pie or bar chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSlice {
    pub name: String,
    pub value: f64,
    pub color: &'static str,
}

/// The rendered active screen.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum Screen {
    Fleet(FleetSummary),
    Detail(Box<PrinterDetail>),
    Alerts(AlertsScreen),
    Visualization(KioskScreen),
    Booking(BookingScreen),
}

impl Screen {
    pub fn view(&self) -> View {
        match self {
            Screen::Fleet(_) => View::Fleet,
            Screen::Detail(_) => View::Detail,
            Screen::Alerts(_) => View::Alerts,
            Screen::Visualization(_) => View::Visualization,
            Screen::Booking(_) => View::Booking,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NavItem {
    pub label: &'static str,
    pub view: View,
    pub active: bool,
    pub action: NavAction,
}

/// Persistent navigation bar shown above the non-kiosk screens.
#[derive(Debug, Clone, Serialize)]
pub struct Navbar {
    pub app_name: &'static str,
    pub items: Vec<NavItem>,
}

pub fn navbar(current: View) -> Navbar {
    let entries = [
        ("Dashboard", View::Fleet, NavAction::Back),
        ("Alerts", View::Alerts, NavAction::ViewAlerts),
        ("Kiosk", View::Visualization, NavAction::OpenVisualization),
        ("Booking", View::Booking, NavAction::OpenBooking),
    ];
    Navbar {
        app_name: APP_NAME,
        items: entries
            .into_iter()
            .map(|(label, view, action)| NavItem {
                label,
                view,
                active: view == current,
                action,
            })
            .collect(),
    }
}

/// What `GET /api/v1/screen` returns.
#[derive(Debug, Clone, Serialize)]
pub struct ScreenFrame {
    pub navbar: Option<Navbar>,
    pub screen: Screen,
}

impl ScreenFrame {
    pub fn new(screen: Screen) -> Self {
        let view = screen.view();
        Self {
            navbar: view.shows_navbar().then(|| navbar(view)),
            screen,
        }
    }
}

/// Mean of `values`, 0 for an empty input.
pub(crate) fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

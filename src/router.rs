// src/router.rs - Screen selection
//
// The router holds nothing but the active view and the selected printer id.
// It never touches printer data beyond checking that an id resolves.

use printlab_shared::PrinterRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Printer '{0}' not found")]
    PrinterNotFound(String),
}

/// The five navigable screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Fleet,
    Detail,
    Alerts,
    Visualization,
    Booking,
}

impl View {
    /// Kiosk-style views run full screen without the navigation bar.
    pub fn shows_navbar(self) -> bool {
        match self {
            View::Fleet | View::Detail | View::Alerts => true,
            View::Visualization | View::Booking => false,
        }
    }
}

/// A navigation request issued by a screen or the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NavAction {
    SelectPrinter { printer_id: String },
    ViewAlerts,
    OpenVisualization,
    OpenBooking,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: View,
    pub to: View,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

#[derive(Debug, Clone)]
pub struct ViewRouter {
    current: View,
    selected: Option<String>,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewRouter {
    pub fn new() -> Self {
        Self {
            current: View::Fleet,
            selected: None,
        }
    }

    pub fn current(&self) -> View {
        self.current
    }

    pub fn selected_printer_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn show_navbar(&self) -> bool {
        self.current.shows_navbar()
    }

    pub fn apply(&mut self, action: &NavAction, printers: &[PrinterRecord]) -> Result<Transition, NavigationError> {
        match action {
            NavAction::SelectPrinter { printer_id } => self.select_printer(printer_id, printers),
            NavAction::ViewAlerts => Ok(self.go(View::Alerts)),
            NavAction::OpenVisualization => Ok(self.go(View::Visualization)),
            NavAction::OpenBooking => Ok(self.go(View::Booking)),
            NavAction::Back => Ok(self.back()),
        }
    }

    /// Opens the detail view for `printer_id`. An unknown id leaves the
    /// router where it was.
    pub fn select_printer(&mut self, printer_id: &str, printers: &[PrinterRecord]) -> Result<Transition, NavigationError> {
        if !printers.iter().any(|p| p.id == printer_id) {
            tracing::warn!("Cannot open detail view: printer '{}' not found", printer_id);
            return Err(NavigationError::PrinterNotFound(printer_id.to_string()));
        }
        self.selected = Some(printer_id.to_string());
        Ok(self.go(View::Detail))
    }

    pub fn view_alerts(&mut self) -> Transition {
        self.go(View::Alerts)
    }

    pub fn open_visualization(&mut self) -> Transition {
        self.go(View::Visualization)
    }

    pub fn open_booking(&mut self) -> Transition {
        self.go(View::Booking)
    }

    /// Returns to the fleet overview from anywhere.
    pub fn back(&mut self) -> Transition {
        self.go(View::Fleet)
    }

    /// The printer the detail view should show. When the view is detail but
    /// the selection no longer resolves, the router falls back to fleet.
    pub fn resolve_detail<'a>(&mut self, printers: &'a [PrinterRecord]) -> Option<&'a PrinterRecord> {
        if self.current != View::Detail {
            return None;
        }
        let found = self
            .selected
            .as_deref()
            .and_then(|id| printers.iter().find(|p| p.id == id));
        if found.is_none() {
            tracing::warn!("Selected printer {:?} vanished, returning to fleet", self.selected);
            self.back();
        }
        found
    }

    fn go(&mut self, to: View) -> Transition {
        let transition = Transition { from: self.current, to };
        if transition.changed() {
            tracing::debug!("Navigating {:?} -> {:?}", transition.from, transition.to);
        }
        self.current = to;
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printlab_shared::fixtures::initial_printers;

    #[test]
    fn test_navbar_hidden_only_for_kiosk_views() {
        assert!(View::Fleet.shows_navbar());
        assert!(View::Detail.shows_navbar());
        assert!(View::Alerts.shows_navbar());
        assert!(!View::Visualization.shows_navbar());
        assert!(!View::Booking.shows_navbar());
    }

    #[test]
    fn test_nav_action_wire_format() {
        let action: NavAction = serde_json::from_str(r#"{"action":"select_printer","printer_id":"p3"}"#).unwrap();
        assert_eq!(action, NavAction::SelectPrinter { printer_id: "p3".to_string() });
        let action: NavAction = serde_json::from_str(r#"{"action":"back"}"#).unwrap();
        assert_eq!(action, NavAction::Back);
    }

    #[test]
    fn test_resolve_detail_falls_back_when_printer_removed() {
        let mut printers = initial_printers();
        let mut router = ViewRouter::new();
        router.select_printer("p5", &printers).unwrap();
        printers.retain(|p| p.id != "p5");
        assert!(router.resolve_detail(&printers).is_none());
        assert_eq!(router.current(), View::Fleet);
    }
}

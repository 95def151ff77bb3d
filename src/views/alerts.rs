// Alerts table, in log order.

use printlab_shared::style::{Style, Styled};
use printlab_shared::{AlertItem, AlertSeverity, AlertStatus};
use serde::Serialize;

use crate::router::NavAction;

#[derive(Debug, Clone, Serialize)]
pub struct AlertRow {
    pub id: String,
    pub timestamp: String,
    pub printer_id: String,
    pub printer_name: String,
    pub severity: AlertSeverity,
    pub severity_style: Style,
    pub message: String,
    pub status: AlertStatus,
    pub status_style: Style,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertsScreen {
    pub rows: Vec<AlertRow>,
    pub active_count: usize,
    pub on_back: NavAction,
}

pub fn alerts_screen(alerts: &[AlertItem]) -> AlertsScreen {
    AlertsScreen {
        rows: alerts
            .iter()
            .map(|a| AlertRow {
                id: a.id.clone(),
                timestamp: a.timestamp.clone(),
                printer_id: a.printer_id.clone(),
                printer_name: a.printer_name.clone(),
                severity: a.severity,
                severity_style: a.severity.style(),
                message: a.message.clone(),
                status: a.status,
                status_style: a.status.style(),
            })
            .collect(),
        active_count: alerts.iter().filter(|a| a.is_active()).count(),
        on_back: NavAction::Back,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use printlab_shared::fixtures::mock_alerts;

    #[test]
    fn test_rows_keep_fixture_order() {
        let screen = alerts_screen(&mock_alerts());
        let ids: Vec<_> = screen.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["a1", "a2", "a3"]);
        assert_eq!(screen.active_count, 1);
        assert_eq!(screen.rows[0].severity_style.class, "bg-red-100 text-red-700");
        assert_eq!(screen.rows[1].status_style.class, "text-green-600");
    }
}

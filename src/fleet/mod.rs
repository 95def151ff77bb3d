// src/fleet/mod.rs - In-memory fleet state
//
// The store owns the printer list for the lifetime of the process. The only
// mutation is the simulation tick; everything else reads snapshots.

pub mod drift;

use std::sync::{Arc, Mutex};
use std::time::Duration;

use printlab_shared::fixtures::{initial_printers, mock_alerts};
use printlab_shared::{AlertItem, PrinterRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::RwLock;

pub use drift::{DriftSettings, apply_drift};

use crate::config::SimulationConfig;
use crate::timer::{FirstTick, Ticker};

/// Shared handle to the fleet. Clones refer to the same list.
#[derive(Clone)]
pub struct FleetStore {
    printers: Arc<RwLock<Vec<PrinterRecord>>>,
    alerts: Arc<Vec<AlertItem>>,
    settings: DriftSettings,
    rng: Arc<Mutex<StdRng>>,
}

impl FleetStore {
    /// Seeds the store. Each record's alert count is recomputed from the
    /// alert log so the two never disagree.
    pub fn new(mut printers: Vec<PrinterRecord>, alerts: Vec<AlertItem>, settings: DriftSettings, rng: StdRng) -> Self {
        reconcile_alert_counts(&mut printers, &alerts);
        tracing::info!("Fleet store seeded with {} printers and {} alerts", printers.len(), alerts.len());
        Self {
            printers: Arc::new(RwLock::new(printers)),
            alerts: Arc::new(alerts),
            settings,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// Store seeded from the built-in fixtures.
    pub fn from_config(config: &SimulationConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(initial_printers(), mock_alerts(), DriftSettings::from(config), rng)
    }

    /// Snapshot of the fleet in fixture order.
    pub async fn printers(&self) -> Vec<PrinterRecord> {
        self.printers.read().await.clone()
    }

    pub async fn printer(&self, id: &str) -> Option<PrinterRecord> {
        self.printers.read().await.iter().find(|p| p.id == id).cloned()
    }

    pub fn alerts(&self) -> &[AlertItem] {
        &self.alerts
    }

    /// Applies one simulation step to the whole list under a single write
    /// lock and returns the number of records that changed.
    pub async fn tick(&self) -> usize {
        let mut printers = self.printers.write().await;
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let updated = apply_drift(&mut printers, &self.settings, &mut *rng);
        tracing::debug!("Fleet tick updated {} printers", updated);
        updated
    }

    /// Starts the periodic tick. The returned ticker owns the timer; drop or
    /// stop it to end the simulation.
    pub fn start_simulation(&self, period: Duration) -> Ticker {
        let store = self.clone();
        tracing::info!("Starting fleet simulation every {:?}", period);
        Ticker::spawn("fleet-tick", period, FirstTick::AfterPeriod, move || {
            let store = store.clone();
            async move {
                store.tick().await;
            }
        })
    }
}

/// Sets each printer's `alerts` to the number of active alerts raised by it.
pub fn reconcile_alert_counts(printers: &mut [PrinterRecord], alerts: &[AlertItem]) {
    for printer in printers.iter_mut() {
        let active = alerts
            .iter()
            .filter(|a| a.is_active() && a.printer_id == printer.id)
            .count() as u32;
        if active != printer.alerts {
            tracing::debug!(
                "Printer {} alert count {} reconciled to {}",
                printer.id,
                printer.alerts,
                active
            );
            printer.alerts = active;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_counts_active_alerts_only() {
        let mut printers = initial_printers();
        reconcile_alert_counts(&mut printers, &mock_alerts());
        let counts: Vec<u32> = printers.iter().map(|p| p.alerts).collect();
        // a1 is active on p3; a2 (p5) is resolved and a3 (p2) pending.
        assert_eq!(counts, [0, 0, 1, 0, 0]);
    }

    #[tokio::test]
    async fn test_lookup_by_id() {
        let store = FleetStore::new(initial_printers(), Vec::new(), DriftSettings::default(), StdRng::seed_from_u64(0));
        assert_eq!(store.printer("p4").await.map(|p| p.name), Some("Bambu A4".to_string()));
        assert!(store.printer("p42").await.is_none());
        assert_eq!(store.printers().await.len(), 5);
    }
}

//! Integration tests for the fleet store and its simulation tick

use printlab::fleet::{DriftSettings, FleetStore};
use printlab_shared::PrinterStatus;
use printlab_shared::fixtures::{initial_printers, mock_alerts};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

fn seeded_store(seed: u64) -> FleetStore {
    FleetStore::new(initial_printers(), mock_alerts(), DriftSettings::default(), StdRng::seed_from_u64(seed))
}

#[tokio::test]
async fn test_tick_only_moves_printing_records() {
    let store = seeded_store(7);
    let before = store.printers().await;
    let updated = store.tick().await;
    let after = store.printers().await;
    assert_eq!(updated, 2);
    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(old.id, new.id);
        if old.status != PrinterStatus::Printing {
            assert_eq!(old, new);
            continue;
        }
        assert_eq!(new.progress, (old.progress + 0.5).min(99.0));
        assert!((new.nozzle_temp - old.nozzle_temp).abs() <= 0.5);
        assert_eq!(new.status, PrinterStatus::Printing);
        assert_eq!(new.bed_temp, old.bed_temp);
        assert_eq!(new.job_name, old.job_name);
    }
}

#[tokio::test]
async fn test_progress_saturates_below_completion() {
    let store = seeded_store(11);
    for _ in 0..200 {
        store.tick().await;
    }
    for printer in store.printers().await {
        match printer.status {
            PrinterStatus::Printing => assert_eq!(printer.progress, 99.0),
            PrinterStatus::Finished => assert_eq!(printer.progress, 100.0),
            _ => assert!(printer.progress <= 99.0),
        }
    }
}

#[tokio::test]
async fn test_nozzle_stays_within_accumulated_jitter() {
    let store = seeded_store(3);
    let start = store.printer("p1").await.unwrap().nozzle_temp;
    for _ in 0..20 {
        store.tick().await;
    }
    let end = store.printer("p1").await.unwrap().nozzle_temp;
    assert!((end - start).abs() <= 20.0 * 0.5);
}

#[tokio::test]
async fn test_same_seed_same_fleet() {
    let a = seeded_store(42);
    let b = seeded_store(42);
    for _ in 0..5 {
        a.tick().await;
        b.tick().await;
    }
    assert_eq!(a.printers().await, b.printers().await);
}

#[tokio::test]
async fn test_alert_counts_follow_active_alerts() {
    let store = seeded_store(0);
    let counts: Vec<(String, u32)> = store.printers().await.into_iter().map(|p| (p.id, p.alerts)).collect();
    assert_eq!(counts[2], ("p3".to_string(), 1));
    assert_eq!(counts.iter().map(|(_, n)| n).sum::<u32>(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_simulation_ticks_on_period_until_stopped() {
    let store = seeded_store(5);
    let simulation = store.start_simulation(Duration::from_secs(2));
    tokio::time::sleep(Duration::from_millis(4500)).await;
    assert_eq!(store.printer("p1").await.unwrap().progress, 66.0);

    simulation.stop().await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(store.printer("p1").await.unwrap().progress, 66.0);
}

#[tokio::test(start_paused = true)]
async fn test_restarted_simulation_runs_a_single_timer() {
    let store = seeded_store(8);
    let first = store.start_simulation(Duration::from_secs(2));
    tokio::time::sleep(Duration::from_millis(2500)).await;
    first.stop().await;
    assert_eq!(store.printer("p1").await.unwrap().progress, 65.5);

    let second = store.start_simulation(Duration::from_secs(2));
    tokio::time::sleep(Duration::from_millis(4500)).await;
    // Two ticks since the restart, one step each.
    assert_eq!(store.printer("p1").await.unwrap().progress, 66.5);
    assert_eq!(store.printer("p4").await.unwrap().progress, 90.5);

    second.stop().await;
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(store.printer("p1").await.unwrap().progress, 66.5);
}

// Benchmarks for the fleet tick and screen rendering
// Run with: cargo bench

use chrono::Local;
use criterion::{Criterion, criterion_group, criterion_main};
use printlab::fleet::{DriftSettings, apply_drift};
use printlab::views::{booking_screen, fleet_summary, kiosk_screen};
use printlab::booking::BookingFeed;
use printlab_shared::PrinterRecord;
use printlab_shared::fixtures::{initial_printers, mock_printer_booking_status};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// The fixture fleet repeated to `size` records with unique ids.
fn large_fleet(size: usize) -> Vec<PrinterRecord> {
    let base = initial_printers();
    (0..size)
        .map(|i| {
            let mut printer = base[i % base.len()].clone();
            printer.id = format!("p{}", i + 1);
            printer
        })
        .collect()
}

fn bench_drift(c: &mut Criterion) {
    let mut printers = large_fleet(1_000);
    let settings = DriftSettings::default();
    let mut rng = StdRng::seed_from_u64(0);
    c.bench_function("drift tick (1k printers)", |b| {
        b.iter(|| apply_drift(&mut printers, &settings, &mut rng));
    });
}

fn bench_screens(c: &mut Criterion) {
    let printers = large_fleet(1_000);
    let now = Local::now();
    c.bench_function("fleet summary (1k printers)", |b| {
        b.iter(|| fleet_summary(&printers));
    });
    c.bench_function("kiosk screen (1k printers)", |b| {
        b.iter(|| kiosk_screen(&printers, now, "FIELDLAB"));
    });
    let feed = BookingFeed {
        statuses: mock_printer_booking_status(),
        ..BookingFeed::default()
    };
    c.bench_function("booking screen (fixture)", |b| {
        b.iter(|| booking_screen(&feed, true));
    });
}

criterion_group!(benches, bench_drift, bench_screens);
criterion_main!(benches);

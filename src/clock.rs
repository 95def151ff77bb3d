// src/clock.rs - Wall clock for the kiosk screen

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::timer::{FirstTick, Ticker};

/// Refreshes the displayed time on a fixed period while the kiosk view is
/// mounted.
pub struct KioskClock {
    now: Arc<RwLock<DateTime<Local>>>,
    updates: Arc<AtomicU64>,
    ticker: Ticker,
}

impl KioskClock {
    pub fn start(period: Duration) -> Self {
        let now = Arc::new(RwLock::new(Local::now()));
        let updates = Arc::new(AtomicU64::new(0));
        let (tick_now, tick_updates) = (now.clone(), updates.clone());
        let ticker = Ticker::spawn("kiosk-clock", period, FirstTick::AfterPeriod, move || {
            let now = tick_now.clone();
            let updates = tick_updates.clone();
            async move {
                match now.write() {
                    Ok(mut guard) => *guard = Local::now(),
                    Err(poisoned) => *poisoned.into_inner() = Local::now(),
                }
                updates.fetch_add(1, Ordering::Relaxed);
            }
        });
        Self { now, updates, ticker }
    }

    /// The time as of the last tick.
    pub fn now(&self) -> DateTime<Local> {
        match self.now.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Number of ticks applied so far.
    pub fn updates(&self) -> u64 {
        self.updates.load(Ordering::Relaxed)
    }

    /// Shared counter of applied ticks, readable after the clock is gone.
    pub fn update_counter(&self) -> Arc<AtomicU64> {
        self.updates.clone()
    }

    pub fn is_running(&self) -> bool {
        self.ticker.is_running()
    }

    pub async fn stop(self) {
        self.ticker.stop().await;
    }
}

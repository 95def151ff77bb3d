// src/booking/monitor.rs - Screen-lifetime booking poller
//
// Mounted when the booking view opens, dropped when it closes. Every fetch
// takes a generation number; a result is applied only if no newer fetch was
// started and the monitor is still mounted.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Local};
use printlab_shared::PrinterBookingStatus;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::{BookingError, BookingSource};
use crate::timer::{FirstTick, Ticker};

/// What the booking screen renders from.
#[derive(Debug, Clone, Default)]
pub struct BookingFeed {
    pub statuses: Vec<PrinterBookingStatus>,
    pub loading: bool,
    pub last_updated: Option<DateTime<Local>>,
    pub last_error: Option<BookingError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed(BookingError),
    /// The monitor was unmounted or a newer fetch started while this one ran.
    Discarded,
}

struct Shared {
    source: Arc<dyn BookingSource>,
    feed: RwLock<BookingFeed>,
    generation: AtomicU64,
    in_flight: AtomicU64,
    mounted: AtomicBool,
}

impl Shared {
    fn is_current(&self, generation: u64) -> bool {
        self.mounted.load(Ordering::SeqCst) && self.generation.load(Ordering::SeqCst) == generation
    }

    async fn fetch_once(&self) -> FetchOutcome {
        let generation = {
            let mut feed = self.feed.write().await;
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            feed.loading = true;
            self.generation.fetch_add(1, Ordering::SeqCst) + 1
        };

        let result = self.source.fetch_booking_statuses().await;

        // `in_flight` and `loading` only change together under the feed lock.
        let mut feed = self.feed.write().await;
        let remaining = self.in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
        feed.loading = remaining > 0;
        if !self.is_current(generation) {
            tracing::debug!("Discarding stale booking result (generation {})", generation);
            return FetchOutcome::Discarded;
        }

        match result {
            Ok(statuses) => {
                tracing::debug!("Booking feed refreshed with {} printers", statuses.len());
                feed.statuses = statuses;
                feed.last_updated = Some(Local::now());
                feed.last_error = None;
                FetchOutcome::Applied
            }
            Err(e) => {
                match &e {
                    BookingError::Auth(_) => tracing::error!("Failed to fetch booking data: {}", e),
                    BookingError::Network(_) => tracing::warn!("Failed to fetch booking data: {}", e),
                }
                feed.last_error = Some(e.clone());
                FetchOutcome::Failed(e)
            }
        }
    }

    /// One scheduled poll: fetch, then retry transient failures with
    /// exponential backoff for as long as the next poll is not due.
    async fn poll(&self, retry_base: Duration, poll_interval: Duration) {
        let mut outcome = self.fetch_once().await;
        let mut delay = retry_base;
        let mut waited = Duration::ZERO;
        while let FetchOutcome::Failed(ref e) = outcome {
            if !e.is_retryable() || delay.is_zero() || waited + delay >= poll_interval {
                break;
            }
            tracing::info!("Retrying booking fetch in {:?}", delay);
            tokio::time::sleep(delay).await;
            if !self.mounted.load(Ordering::SeqCst) {
                return;
            }
            waited += delay;
            delay = (delay * 2).min(poll_interval);
            outcome = self.fetch_once().await;
        }
    }
}

pub struct BookingMonitor {
    shared: Arc<Shared>,
    poller: Option<Ticker>,
}

impl BookingMonitor {
    /// Fetches immediately and then every `poll_interval` until unmounted.
    pub fn mount(source: Arc<dyn BookingSource>, poll_interval: Duration, retry_base: Duration) -> Self {
        let shared = Arc::new(Shared {
            source,
            feed: RwLock::new(BookingFeed {
                loading: true,
                ..BookingFeed::default()
            }),
            generation: AtomicU64::new(0),
            in_flight: AtomicU64::new(0),
            mounted: AtomicBool::new(true),
        });
        let poll_shared = shared.clone();
        let poller = Ticker::spawn("booking-poll", poll_interval, FirstTick::Immediate, move || {
            let shared = poll_shared.clone();
            async move {
                shared.poll(retry_base, poll_interval).await;
            }
        });
        tracing::info!("Booking monitor mounted, polling every {:?}", poll_interval);
        Self {
            shared,
            poller: Some(poller),
        }
    }

    /// Starts a fetch right away without waiting for it. The feed reports
    /// `loading` until it completes.
    pub fn refresh(&self) -> JoinHandle<FetchOutcome> {
        tracing::info!("Manual booking refresh requested");
        let shared = self.shared.clone();
        tokio::spawn(async move { shared.fetch_once().await })
    }

    pub async fn feed(&self) -> BookingFeed {
        self.shared.feed.read().await.clone()
    }

    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.load(Ordering::SeqCst)
    }

    /// Stops polling and disowns any fetch still in flight. A poll waiting
    /// out a retry delay is cancelled rather than awaited.
    pub async fn unmount(mut self) {
        self.detach();
        if let Some(poller) = self.poller.take() {
            drop(poller);
            tokio::task::yield_now().await;
        }
        tracing::info!("Booking monitor unmounted");
    }

    fn detach(&self) {
        self.shared.mounted.store(false, Ordering::SeqCst);
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Drop for BookingMonitor {
    fn drop(&mut self) {
        self.detach();
    }
}

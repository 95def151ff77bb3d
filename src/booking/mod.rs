//! Booking feed integration.
//!
//! The booking system is reached through [`BookingSource`]. Only the mock is
//! implemented; a live source would issue an authenticated GET against the
//! configured endpoint and map transport failures to [`BookingError::Network`]
//! and rejected credentials to [`BookingError::Auth`].

pub mod monitor;

use async_trait::async_trait;
use printlab_shared::PrinterBookingStatus;
use printlab_shared::fixtures::mock_printer_booking_status;
use std::time::Duration;
use thiserror::Error;

pub use monitor::{BookingFeed, BookingMonitor, FetchOutcome};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Booking feed unreachable: {0}")]
    Network(String),
    #[error("Booking feed rejected credentials: {0}")]
    Auth(String),
}

impl BookingError {
    /// Transport failures are worth retrying; credential failures are not.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::Network(_))
    }
}

#[async_trait]
pub trait BookingSource: Send + Sync + 'static {
    async fn fetch_booking_statuses(&self) -> Result<Vec<PrinterBookingStatus>, BookingError>;
}

/// Returns a fixed dataset after an artificial delay.
#[derive(Debug, Clone)]
pub struct MockBookingSource {
    latency: Duration,
    statuses: Vec<PrinterBookingStatus>,
}

impl MockBookingSource {
    pub fn new(latency: Duration, statuses: Vec<PrinterBookingStatus>) -> Self {
        Self { latency, statuses }
    }

    /// The built-in compliance fixture.
    pub fn from_fixture(latency: Duration) -> Self {
        Self::new(latency, mock_printer_booking_status())
    }
}

#[async_trait]
impl BookingSource for MockBookingSource {
    async fn fetch_booking_statuses(&self) -> Result<Vec<PrinterBookingStatus>, BookingError> {
        tokio::time::sleep(self.latency).await;
        Ok(self.statuses.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_mock_waits_then_returns_fixture() {
        let source = MockBookingSource::from_fixture(Duration::from_millis(500));
        let start = tokio::time::Instant::now();
        let statuses = source.fetch_booking_statuses().await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
        assert_eq!(statuses.len(), 5);
    }

    #[test]
    fn test_only_network_errors_retry() {
        assert!(BookingError::Network("timeout".into()).is_retryable());
        assert!(!BookingError::Auth("expired token".into()).is_retryable());
    }
}

// src/timer.rs - Owned periodic tasks
//
// A `Ticker` is the only way the dashboard runs anything on a period. It owns
// the spawned task; stopping or dropping it cancels the task exactly once.

use std::future::Future;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// When the first tick fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirstTick {
    /// Right away, then every period.
    Immediate,
    /// After one full period.
    AfterPeriod,
}

pub struct Ticker {
    name: &'static str,
    period: Duration,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    /// Spawns `on_tick` on the current runtime every `period`. A tick that
    /// overruns the period delays the next one instead of bursting.
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, first: FirstTick, mut on_tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let start = match first {
            FirstTick::Immediate => Instant::now(),
            FirstTick::AfterPeriod => Instant::now() + period,
        };
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        tracing::debug!("{} timer shutting down", name);
                        break;
                    }
                    _ = interval.tick() => {
                        on_tick().await;
                    }
                }
            }
        });
        tracing::debug!("{} timer started ({:?})", name, period);
        Self {
            name,
            period,
            shutdown_tx: Some(shutdown_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signals the task and waits for it to leave its loop. A tick already in
    /// progress runs to completion first.
    pub async fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                if !e.is_cancelled() {
                    tracing::error!("{} timer task failed: {}", self.name, e);
                }
            }
        }
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("{} timer cancelled", self.name);
        }
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("name", &self.name)
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_ticker(first: FirstTick) -> (Ticker, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let ticker = Ticker::spawn("test", Duration::from_millis(100), first, move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });
        (ticker, count)
    }

    #[tokio::test(start_paused = true)]
    async fn test_after_period_waits_for_first_tick() {
        let (ticker, count) = counting_ticker(FirstTick::AfterPeriod);
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);
        tokio::time::sleep(Duration::from_millis(260)).await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_immediate_ticks_on_start() {
        let (ticker, count) = counting_ticker(FirstTick::Immediate);
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(count.load(Ordering::SeqCst), 1);
        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_task() {
        let (ticker, count) = counting_ticker(FirstTick::AfterPeriod);
        tokio::time::sleep(Duration::from_millis(150)).await;
        drop(ticker);
        let seen = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_ticks() {
        let (ticker, count) = counting_ticker(FirstTick::AfterPeriod);
        assert!(ticker.is_running());
        tokio::time::sleep(Duration::from_millis(250)).await;
        ticker.stop().await;
        let seen = count.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }
}

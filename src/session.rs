// src/session.rs - One dashboard session
//
// The session owns the router and every screen-lifetime resource. Entering
// the visualization view mounts the kiosk clock, entering the booking view
// mounts the booking monitor; leaving either view tears its resource down
// before the transition returns.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::booking::{BookingMonitor, BookingSource, FetchOutcome};
use crate::clock::KioskClock;
use crate::config::Config;
use crate::fleet::FleetStore;
use crate::router::{NavAction, NavigationError, Transition, View, ViewRouter};
use crate::views::{
    Screen, ScreenFrame, alerts_screen, booking_screen, fleet_summary, kiosk_screen, printer_detail,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Navigation(#[from] NavigationError),
    #[error("Booking view is not open")]
    BookingNotMounted,
    #[error("Dashboard session is not running")]
    Closed,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub kiosk_title: String,
    pub clock_interval: Duration,
    pub booking_poll: Duration,
    pub booking_retry_base: Duration,
    /// Whether the booking source is the built-in mock.
    pub mock_booking: bool,
}

impl From<&Config> for SessionSettings {
    fn from(config: &Config) -> Self {
        Self {
            kiosk_title: config.kiosk.title.clone(),
            clock_interval: config.kiosk.clock_interval(),
            booking_poll: config.booking.poll_interval(),
            booking_retry_base: config.booking.retry_base(),
            mock_booking: true,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

pub struct DashboardSession {
    router: ViewRouter,
    fleet: FleetStore,
    booking_source: Arc<dyn BookingSource>,
    settings: SessionSettings,
    kiosk_clock: Option<KioskClock>,
    booking: Option<BookingMonitor>,
}

impl DashboardSession {
    pub fn new(fleet: FleetStore, booking_source: Arc<dyn BookingSource>, settings: SessionSettings) -> Self {
        Self {
            router: ViewRouter::new(),
            fleet,
            booking_source,
            settings,
            kiosk_clock: None,
            booking: None,
        }
    }

    pub fn current_view(&self) -> View {
        self.router.current()
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn kiosk_clock(&self) -> Option<&KioskClock> {
        self.kiosk_clock.as_ref()
    }

    pub fn booking_monitor(&self) -> Option<&BookingMonitor> {
        self.booking.as_ref()
    }

    pub async fn navigate(&mut self, action: &NavAction) -> Result<Transition, SessionError> {
        let printers = self.fleet.printers().await;
        let transition = self.router.apply(action, &printers)?;
        self.sync_mounts(transition).await;
        Ok(transition)
    }

    async fn sync_mounts(&mut self, transition: Transition) {
        if !transition.changed() {
            return;
        }
        match transition.from {
            View::Visualization => {
                if let Some(clock) = self.kiosk_clock.take() {
                    clock.stop().await;
                }
            }
            View::Booking => {
                if let Some(monitor) = self.booking.take() {
                    monitor.unmount().await;
                }
            }
            View::Fleet | View::Detail | View::Alerts => {}
        }
        match transition.to {
            View::Visualization => {
                self.kiosk_clock = Some(KioskClock::start(self.settings.clock_interval));
            }
            View::Booking => {
                self.booking = Some(BookingMonitor::mount(
                    self.booking_source.clone(),
                    self.settings.booking_poll,
                    self.settings.booking_retry_base,
                ));
            }
            View::Fleet | View::Detail | View::Alerts => {}
        }
    }

    /// Renders the active screen from the current fleet snapshot.
    pub async fn render(&mut self) -> ScreenFrame {
        let printers = self.fleet.printers().await;
        let screen = match self.router.current() {
            View::Fleet => Screen::Fleet(fleet_summary(&printers)),
            View::Detail => match printer_detail(self.router.resolve_detail(&printers)) {
                Some(detail) => Screen::Detail(Box::new(detail)),
                None => Screen::Fleet(fleet_summary(&printers)),
            },
            View::Alerts => Screen::Alerts(alerts_screen(self.fleet.alerts())),
            View::Visualization => {
                let now = match &self.kiosk_clock {
                    Some(clock) => clock.now(),
                    None => chrono::Local::now(),
                };
                Screen::Visualization(kiosk_screen(&printers, now, &self.settings.kiosk_title))
            }
            View::Booking => {
                let feed = match &self.booking {
                    Some(monitor) => monitor.feed().await,
                    None => Default::default(),
                };
                Screen::Booking(booking_screen(&feed, self.settings.mock_booking))
            }
        };
        ScreenFrame::new(screen)
    }

    /// Starts a manual booking fetch. Only valid while the booking view is open.
    pub fn refresh_booking(&self) -> Result<JoinHandle<FetchOutcome>, SessionError> {
        self.booking
            .as_ref()
            .map(BookingMonitor::refresh)
            .ok_or(SessionError::BookingNotMounted)
    }

    /// Tears down every screen-lifetime resource.
    pub async fn shutdown(mut self) {
        if let Some(clock) = self.kiosk_clock.take() {
            clock.stop().await;
        }
        if let Some(monitor) = self.booking.take() {
            monitor.unmount().await;
        }
        tracing::info!("Dashboard session closed");
    }

    /// Serves requests from the web handlers until every sender is gone.
    pub async fn run(mut self, mut requests: mpsc::Receiver<SessionRequest>) {
        tracing::info!("Dashboard session started");
        while let Some(request) = requests.recv().await {
            match request {
                SessionRequest::GetScreen { respond_to } => {
                    let _ = respond_to.send(self.render().await);
                }
                SessionRequest::Navigate { action, respond_to } => {
                    let result = match self.navigate(&action).await {
                        Ok(_) => Ok(self.render().await),
                        Err(e) => Err(e),
                    };
                    let _ = respond_to.send(result);
                }
                SessionRequest::RefreshBooking { respond_to } => {
                    let _ = respond_to.send(self.refresh_booking().map(|_| ()));
                }
            }
        }
        self.shutdown().await;
    }
}

/// Messages from the web handlers to the session task.
#[derive(Debug)]
pub enum SessionRequest {
    GetScreen {
        respond_to: oneshot::Sender<ScreenFrame>,
    },
    Navigate {
        action: NavAction,
        respond_to: oneshot::Sender<Result<ScreenFrame, SessionError>>,
    },
    RefreshBooking {
        respond_to: oneshot::Sender<Result<(), SessionError>>,
    },
}

/// Cloneable handle used by the web layer to talk to the session task.
#[derive(Clone, Debug)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionRequest>,
}

impl SessionHandle {
    pub fn new(tx: mpsc::Sender<SessionRequest>) -> Self {
        Self { tx }
    }

    /// Spawns `session` on the runtime and returns a handle to it.
    pub fn spawn(session: DashboardSession) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(16);
        let task = tokio::spawn(session.run(rx));
        (Self { tx }, task)
    }

    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> SessionRequest) -> Result<T, SessionError> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.tx.send(build(resp_tx)).await.map_err(|_| SessionError::Closed)?;
        resp_rx.await.map_err(|_| SessionError::Closed)
    }

    pub async fn screen(&self) -> Result<ScreenFrame, SessionError> {
        self.request(|respond_to| SessionRequest::GetScreen { respond_to }).await
    }

    pub async fn navigate(&self, action: NavAction) -> Result<ScreenFrame, SessionError> {
        self.request(|respond_to| SessionRequest::Navigate { action, respond_to })
            .await?
    }

    pub async fn refresh_booking(&self) -> Result<(), SessionError> {
        self.request(|respond_to| SessionRequest::RefreshBooking { respond_to })
            .await?
    }
}

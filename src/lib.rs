// printlab: fleet monitoring dashboard service

pub mod booking;
pub mod clock;
pub mod config;
pub mod fleet;
pub mod router;
pub mod session;
pub mod timer;
pub mod views;
pub mod web;

pub use booking::{BookingError, BookingSource, MockBookingSource};
pub use config::Config;
pub use fleet::FleetStore;
pub use router::{NavAction, View, ViewRouter};
pub use session::{DashboardSession, SessionHandle};

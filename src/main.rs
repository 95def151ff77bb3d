// src/main.rs - Dashboard service entry point
use clap::{Parser, Subcommand, ValueEnum};
use printlab::booking::MockBookingSource;
use printlab::config::{self, Config};
use printlab::fleet::FleetStore;
use printlab::router::NavAction;
use printlab::session::{DashboardSession, SessionHandle, SessionSettings};
use printlab::web;
use std::path::PathBuf;
use std::sync::Arc;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// PrintLab fleet dashboard
#[derive(Parser, Debug)]
#[command(name = "printlab", about = "Monitoring dashboard for a fleet of 3D printers.")]
struct Cli {
    /// Path to the TOML config file
    #[arg(short, long, default_value = "dashboard.toml")]
    config: PathBuf,

    /// Listen address (overrides server.bind)
    #[arg(long)]
    bind: Option<String>,

    /// Log level (overrides logging.level)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve the dashboard API (default)
    Serve,
    /// Render one screen as JSON on stdout and exit
    Render {
        #[arg(value_enum, default_value_t = ScreenArg::Fleet)]
        screen: ScreenArg,
        /// Printer id for the detail screen
        #[arg(long)]
        printer: Option<String>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ScreenArg {
    Fleet,
    Detail,
    Alerts,
    Visualization,
    Booking,
}

fn build_session(config: &Config, fleet: &FleetStore) -> DashboardSession {
    let source = Arc::new(MockBookingSource::from_fixture(config.booking.mock_latency()));
    if let Some(endpoint) = &config.booking.endpoint {
        tracing::warn!("Booking endpoint {} configured but only the mock feed is available", endpoint);
    }
    DashboardSession::new(fleet.clone(), source, SessionSettings::from(config))
}

async fn render(config: &Config, screen: ScreenArg, printer: Option<String>) -> Result<(), BoxError> {
    let fleet = FleetStore::from_config(&config.simulation);
    let mut session = build_session(config, &fleet);
    let action = match screen {
        ScreenArg::Fleet => None,
        ScreenArg::Detail => Some(NavAction::SelectPrinter {
            printer_id: printer.unwrap_or_else(|| "p1".to_string()),
        }),
        ScreenArg::Alerts => Some(NavAction::ViewAlerts),
        ScreenArg::Visualization => Some(NavAction::OpenVisualization),
        ScreenArg::Booking => Some(NavAction::OpenBooking),
    };
    if let Some(action) = action {
        session.navigate(&action).await?;
    }
    if let ScreenArg::Booking = screen {
        session.refresh_booking()?.await?;
    }
    let frame = session.render().await;
    println!("{}", serde_json::to_string_pretty(&frame)?);
    session.shutdown().await;
    Ok(())
}

async fn serve(config: Config) -> Result<(), BoxError> {
    let fleet = FleetStore::from_config(&config.simulation);
    let simulation = fleet.start_simulation(config.simulation.tick_interval());
    let (session, session_task) = SessionHandle::spawn(build_session(&config, &fleet));

    let app = web::api::create_router(session, fleet);
    let listener = tokio::net::TcpListener::bind(&config.server.bind).await?;
    tracing::info!("Web API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutdown requested");
        })
        .await?;

    simulation.stop().await;
    if let Err(e) = session_task.await {
        tracing::error!("Session task failed: {}", e);
    }
    tracing::info!("PrintLab dashboard stopped");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();

    let config_found = cli.config.exists();
    let mut config = config::load_config_or_default(&cli.config).map_err(|e| {
        eprintln!("Failed to load config from '{}': {}", cli.config.display(), e);
        Box::new(e) as BoxError
    })?;
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(config.logging.max_level())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting PrintLab fleet dashboard");
    tracing::info!("Version: {}", env!("CARGO_PKG_VERSION"));
    if config_found {
        tracing::info!("Loaded configuration from {}", cli.config.display());
    } else {
        tracing::warn!("Config file '{}' not found, using defaults", cli.config.display());
    }
    tracing::info!(
        "Fleet tick every {} ms, booking poll every {} ms",
        config.simulation.tick_ms,
        config.booking.poll_ms
    );

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Render { screen, printer } => render(&config, screen, printer).await,
    }
}

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use roost_client::{Config, HttpBookingGateway};
use roost_core::session::MemorySession;
use roost_status::{ApprovalWatcher, BookingActions, StatusBus, StatusMonitor, WatchConfig, WatchOutcome};

#[derive(Parser)]
#[command(name = "roost")]
#[command(about = "Booking status tools for the roost rental platform")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the current booking status snapshot for a user
    Status {
        #[arg(long)]
        user: String,
    },

    /// Poll a freshly paid booking until the owner decides or the wait
    /// ceiling passes
    Watch {
        #[arg(long)]
        user: String,
        #[arg(long)]
        booking: String,
    },

    /// Approve a pending booking (owner side)
    Approve {
        #[arg(long)]
        booking: String,
    },

    /// Reject a pending booking (owner side)
    Reject {
        #[arg(long)]
        booking: String,
    },

    /// Cancel a booking (seeker side)
    Cancel {
        #[arg(long)]
        booking: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roost=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load config")?;
    tracing::info!(base_url = %config.booking_api.base_url, "using booking service");

    let gateway = Arc::new(HttpBookingGateway::from_config(&config));
    let bus = Arc::new(StatusBus::default());

    match cli.command {
        Commands::Status { user } => {
            let session = Arc::new(MemorySession::signed_in(user));
            let monitor = StatusMonitor::new(gateway, session);
            let snapshot = monitor.refresh().await;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
        }
        Commands::Watch { user, booking } => {
            let watch_config = WatchConfig {
                poll_interval: Duration::from_secs(config.watch.poll_interval_seconds),
                max_wait: Duration::from_secs(config.watch.max_wait_seconds),
            };
            let watcher = ApprovalWatcher::new(gateway, bus, watch_config);
            let outcome = watcher.watch(&user, &booking).await;
            let message = match outcome {
                WatchOutcome::Confirmed => "owner approved the booking",
                WatchOutcome::Rejected => "owner rejected the booking",
                WatchOutcome::Cancelled => "booking was cancelled",
                WatchOutcome::TimedOut => "no decision within the wait ceiling",
            };
            println!("{message}");
        }
        Commands::Approve { booking } => {
            BookingActions::new(gateway, bus).approve(&booking).await?;
            println!("booking {booking} approved");
        }
        Commands::Reject { booking } => {
            BookingActions::new(gateway, bus).reject(&booking).await?;
            println!("booking {booking} rejected");
        }
        Commands::Cancel { booking } => {
            BookingActions::new(gateway, bus).cancel(&booking).await?;
            println!("booking {booking} cancelled");
        }
    }

    Ok(())
}

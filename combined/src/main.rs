//! Combined binary for development - runs all services in one process.

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use identity_service_lib::MigrateAction as Action;

#[derive(Parser)]
#[command(name = "account-deletion")]
#[command(about = "Identity, profile and gateway services in one process for development")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all services in a single process (development mode)
    Serve {
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        #[arg(long, default_value = "3000")]
        gateway_port: u16,
        #[arg(long, default_value = "50051")]
        identity_port: u16,
        #[arg(long, default_value = "50052")]
        profile_port: u16,
    },
    /// Run database migrations for both services
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for Action {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Action::Up,
            MigrateAction::Down => Action::Down,
            MigrateAction::Status => Action::Status,
            MigrateAction::Fresh => Action::Fresh,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            gateway_port,
            identity_port,
            profile_port,
        } => {
            info!("Starting combined services in development mode");
            info!("  Gateway:          http://{}:{}", host, gateway_port);
            info!("  Identity service: http://{}:{}", host, identity_port);
            info!("  Profile service:  http://{}:{}", host, profile_port);

            // Identity service first: the other two call it
            let identity_host = host.clone();
            let identity_handle = tokio::spawn(async move {
                if let Err(e) = identity_service_lib::run_embedded(&identity_host, identity_port).await {
                    error!("Identity service failed: {}", e);
                }
            });

            // Wait a moment for identity-service to start
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;

            let profile_host = host.clone();
            let profile_handle = tokio::spawn(async move {
                if let Err(e) =
                    profile_service_lib::run_embedded(&profile_host, profile_port, identity_port).await
                {
                    error!("Profile service failed: {}", e);
                }
            });

            // Wait a moment for profile-service to start
            tokio::time::sleep(std::time::Duration::from_millis(500)).await;

            let gateway_host = host.clone();
            let gateway_handle = tokio::spawn(async move {
                if let Err(e) =
                    gateway_lib::run_embedded(&gateway_host, gateway_port, identity_port, profile_port)
                        .await
                {
                    error!("Gateway failed: {}", e);
                }
            });

            // Wait for any service to exit (which would indicate an error)
            tokio::select! {
                _ = identity_handle => {
                    error!("Identity service exited unexpectedly");
                }
                _ = profile_handle => {
                    error!("Profile service exited unexpectedly");
                }
                _ = gateway_handle => {
                    error!("Gateway exited unexpectedly");
                }
            }
        }
        Commands::Migrate { action } => {
            info!("Identity service migrations");
            identity_service_lib::run_migrations(action.into()).await?;

            info!("Profile service migrations");
            profile_service_lib::run_migrations(action.into()).await?;
        }
    }

    Ok(())
}

//! DIAN - employee records service and command-line client.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use auth_service_lib::session::{FileStorage, SessionManager, SessionState};
use common::ServiceConfig;
use gateway_lib::config::GatewayConfig;
use gateway_lib::views::View;

#[derive(Parser)]
#[command(name = "dian")]
#[command(about = "Employee records service")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Log in against the local record store and save the session
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "DIAN_PASSWORD")]
        password: String,
    },
    /// Show the saved session
    Whoami,
    /// Clear the saved session
    Logout,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| ServiceConfig::default().log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = GatewayConfig::from_env();

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.service.host = host;
            }
            if let Some(port) = port {
                config.service.port = port;
            }
            gateway_lib::run_server(config).await?;
        }
        Commands::Login { username, password } => {
            let sessions = session_manager(&config)?;
            let session = sessions.login(&username, &password).await?;
            println!(
                "Logged in as {} ({}), home {}",
                session.user.username,
                session.user.role,
                View::home_for(session.user.role).path()
            );
        }
        Commands::Whoami => {
            let sessions = session_manager(&config)?;
            match sessions.restore().await {
                SessionState::Authenticated(session) => {
                    let user = session.user;
                    println!("{} ({})", user.username, user.role);
                    if let Some(employee_id) = &user.employee_id {
                        println!("employee: {}", employee_id);
                    }
                    for view in View::nav_items(user.role) {
                        println!("  {:<20} {}", view.title(), view.path());
                    }
                }
                _ => println!("Not logged in"),
            }
        }
        Commands::Logout => {
            let sessions = session_manager(&config)?;
            sessions.restore().await;
            sessions.logout().await;
            println!("Logged out");
        }
    }

    Ok(())
}

fn session_manager(config: &GatewayConfig) -> Result<SessionManager, Box<dyn std::error::Error>> {
    let store = record_service_lib::build_store(&config.records)?;
    let auth = auth_service_lib::build_auth(&config.auth, store);
    let storage = Arc::new(FileStorage::new(&config.auth.session.path));
    Ok(SessionManager::new(auth, storage))
}

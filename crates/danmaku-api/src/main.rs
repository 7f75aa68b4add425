//! Danmaku service entry point.
//!
//! Binary name: `danmaku`
//!
//! Parses CLI arguments, then either starts the HTTP server or mints a
//! bearer token against the configured secret.

mod http;
mod state;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use danmaku_types::config::ServiceConfig;
use state::AppState;

#[derive(Parser)]
#[command(name = "danmaku", version, about = "Comment overlay endpoint for video players")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Listen host (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Listen port (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Mint a bearer token against the configured secret
    Token {
        /// Subject (identity) embedded in the token
        subject: String,

        /// Token lifetime in hours
        #[arg(long, default_value_t = 24)]
        ttl_hours: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,danmaku=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState::init().await?;

            if state.config.jwt_secret == ServiceConfig::default().jwt_secret {
                tracing::warn!("running with the built-in development jwt_secret; set one in danmaku.toml");
            }

            let host = host.unwrap_or_else(|| state.config.host.clone());
            let port = port.unwrap_or(state.config.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Danmaku endpoint listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}/dplayer/v2")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<std::net::SocketAddr>(),
            )
            .with_graceful_shutdown(shutdown_signal())
            .await?;

            println!("\n  Server stopped.");
        }

        Commands::Token { subject, ttl_hours } => {
            let data_dir = danmaku_infra::config::resolve_data_dir();
            let config = danmaku_infra::config::load_config(&data_dir).await;
            let (token, _) =
                danmaku_infra::auth::issue_token(&config.jwt_secret, &subject, ttl_hours)?;

            println!();
            println!(
                "  {} Token for '{}' (valid {} h):",
                console::style("🔑").bold(),
                console::style(&subject).cyan(),
                ttl_hours
            );
            println!();
            println!("  {}", console::style(&token).yellow().bold());
            println!();
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

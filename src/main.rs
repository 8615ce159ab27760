use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use streamline::{api, registry::Registry, service::TranslationService};

#[derive(Parser)]
#[command(name = "streamline")]
#[command(about = "Lifecycle tracking for live-stream translation sessions")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the streamline server
    Serve {
        /// Port for HTTP API
        #[arg(short, long, default_value = "8086")]
        port: u16,

        /// Seconds an interrupted session waits before being finalized
        #[arg(short, long, default_value = "20", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: u64,

        /// Seed the registry with this many demo sessions at startup
        #[arg(long)]
        seed: Option<usize>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "streamline=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(port: u16, timeout: u64, seed: Option<usize>) -> anyhow::Result<()> {
    let registry = Arc::new(Registry::new());
    if let Some(count) = seed {
        registry.seed(count)?;
        tracing::info!("Seeded registry with {} demo sessions", count);
    }

    let service = TranslationService::new(registry);
    let app = api::create_router(service, Duration::from_secs(timeout));

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await?;
    tracing::info!("streamline server listening on http://127.0.0.1:{}", port);

    axum::serve(listener, app).await?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    match cli.command {
        Some(Commands::Serve {
            port,
            timeout,
            seed,
        }) => {
            tracing::info!(
                "Starting streamline server on port {} (interrupt timeout {}s)",
                port,
                timeout
            );
            serve(port, timeout, seed).await?;
        }
        None => {
            // Default: start server
            tracing::info!("Starting streamline server on port 8086 (interrupt timeout 20s)");
            serve(8086, 20, None).await?;
        }
    }

    Ok(())
}

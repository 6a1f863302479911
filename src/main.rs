use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fulfillment::config::Config;
use fulfillment::handlers;
use fulfillment::state::AppState;

/// Fulfills Gumroad sales with Keygen licenses.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env()?;
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    let state = AppState::new(&config);
    let app = handlers::app(state);

    let listener = tokio::net::TcpListener::bind(config.addr()).await?;
    tracing::info!("Listening at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

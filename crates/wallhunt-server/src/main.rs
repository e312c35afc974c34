use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use wallhunt_server::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Missing .env is fine
    let _ = dotenvy::dotenv();

    let settings = Settings::parse();

    let default_filter = if settings.verbose {
        "wallhunt_core=debug,wallhunt_server=debug,tower_http=debug"
    } else {
        "wallhunt_core=info,wallhunt_server=info,tower_http=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(fmt::layer())
        .init();

    wallhunt_server::serve(&settings).await
}

//! knowself - server-side LLM chat proxy for the Know Yourself front-end.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use knowself::config::{self, Config};
use knowself::proxy::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "knowself=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let port = config::port_from_env()?;

    tracing::info!(model = %config.model, base_url = %config.base_url, "Loaded configuration");
    if !config.is_configured() {
        tracing::warn!("API_KEY is not set - chat requests will be rejected");
    }

    run_server(config, port).await
}

//! Binary entrypoint for the duet relay server.

use duet_server::{RelayServerBuilder, ServerError};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("DUET_BIND")
        .unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let server = RelayServerBuilder::new().bind(&addr).build().await?;
    tracing::info!(%addr, "duet relay server listening");
    server.run().await
}

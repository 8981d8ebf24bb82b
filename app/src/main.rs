use tracing::info;
use tracing_subscriber::EnvFilter;

use car_collection_manager::backend::initialize_backend;
use car_collection_manager::shell;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Default to warn so log lines stay out of the menu; RUST_LOG overrides.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    info!("Starting car collection manager");
    let state = initialize_backend().await?;

    shell::run(&state).await
}

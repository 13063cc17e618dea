//! School fee engine HTTP service.
//!
//! Reads the school configuration directory from `FEE_ENGINE_CONFIG`
//! (default `./config/demo_school`) and listens on `FEE_ENGINE_ADDR`
//! (default `0.0.0.0:3000`). Log level follows `RUST_LOG`.

use std::path::PathBuf;

use tracing::{error, info};

use school_fee_engine::api::{AppState, create_router};
use school_fee_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/demo_school";
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir = std::env::var("FEE_ENGINE_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
    let addr = std::env::var("FEE_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(err) => {
            error!(path = %config_dir.display(), error = %err, "Failed to load configuration");
            return Err(err.into());
        }
    };
    info!(
        school = %config.school().name,
        current_session = %config.current_session(),
        "Configuration loaded from {}",
        config_dir.display()
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);
    axum::serve(listener, router).await?;

    Ok(())
}

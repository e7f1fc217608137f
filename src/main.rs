use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cirrhosis_core::{config::addr_from_env_value, CoreConfig, Pipeline, PredictionService};
use cirrhosis_web::AppState;

/// Main entry point for the cirrhosis prediction form
///
/// Loads the serialized pipeline once, then serves the form on the configured address
/// (default: 0.0.0.0:8080). A missing or corrupt model artifact stops the process before it
/// starts listening.
///
/// # Environment Variables
/// - `CIRRHOSIS_ADDR`: Server address (default: "0.0.0.0:8080")
/// - `RUST_LOG`: Log filter (default directive: "cirrhosis=info")
///
/// # Returns
/// * `Ok(())` - If the server starts and runs successfully
/// * `Err(anyhow::Error)` - If the model cannot be loaded or the server fails
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cirrhosis=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let model_path =
        cirrhosis_core::resolve_model_path(None).context("locating model artifact")?;
    let cfg = CoreConfig::new(
        model_path,
        addr_from_env_value(std::env::var("CIRRHOSIS_ADDR").ok()),
    );

    let pipeline = Pipeline::load(cfg.model_path())
        .with_context(|| format!("loading model artifact {}", cfg.model_path().display()))?;
    let state = AppState::new(PredictionService::new(Arc::new(pipeline)));

    tracing::info!("++ Starting cirrhosis prediction form on {}", cfg.addr());

    let app = cirrhosis_web::router(state);
    let listener = tokio::net::TcpListener::bind(cfg.addr())
        .await
        .with_context(|| format!("binding {}", cfg.addr()))?;
    axum::serve(listener, app).await?;

    Ok(())
}

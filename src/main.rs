mod config;
mod error;
mod media;
mod models;
mod openai;
mod pipeline;
mod prompts;
mod routes;
mod services;
mod styles;
#[cfg(test)]
mod testing;

use anyhow::Context;
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{fmt, EnvFilter};

use crate::{config::Config, openai::OpenAiClient, pipeline::Services, routes::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let config = Config::from_env()?;
    tracing::info!("Using API key: {} (base {})", config.masked_key(), config.api_base);

    let services = match &config.api_key {
        Some(key) => {
            let client = Arc::new(OpenAiClient::new(
                key.clone(),
                config.api_base.clone(),
                config.upstream_timeout,
                config.upstream_max_retries,
            )?);
            Some(Services { describer: client.clone(), images: client })
        }
        None => {
            tracing::warn!("⚠️ OPENAI_API_KEY is not set; studio endpoints will report a configuration error");
            None
        }
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = routes::router(AppState::new(config, services)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)),
    );

    tracing::info!(%addr, "Starting server");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

use std::net::SocketAddr;

use anyhow::Context;
use axum::{middleware, Router};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    decompression::RequestDecompressionLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};

use crate::{
    error::ErrorVerbosity,
    metrics,
    middleware::{
        method_not_allowed::method_not_allowed, not_found::not_found,
        record_metrics::record_metrics,
    },
    route,
    state::ApiState,
    store::{BookStore, StoreConfig},
};

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub socket_address: SocketAddr,
    pub error_verbosity: ErrorVerbosity,
    pub store: StoreConfig,
}

impl ServerConfig {
    pub async fn from_config_file(config_file: &str) -> anyhow::Result<Self> {
        let content = tokio::fs::read_to_string(config_file)
            .await
            .with_context(|| format!("Failed to read config file: {config_file}"))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {config_file}"))
    }
}

pub struct Server {
    config: ServerConfig,
}

impl Server {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub(crate) fn router(state: ApiState) -> Router {
        Router::new()
            .merge(route::books::app::app())
            .merge(route::metrics::app())
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(
                state.clone(),
                method_not_allowed,
            ))
            .layer(middleware::from_fn(record_metrics))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(DefaultMakeSpan::new().level(tracing::Level::INFO))
                            .on_request(DefaultOnRequest::new().level(tracing::Level::INFO))
                            .on_response(DefaultOnResponse::new().level(tracing::Level::INFO)),
                    )
                    .layer(RequestDecompressionLayer::new())
                    .layer(CompressionLayer::new())
                    .layer(CorsLayer::permissive()),
            )
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let metrics_handle = metrics::install_recorder()?;

        let store = BookStore::connect(&self.config.store)
            .await
            .context("Failed to set up the book store")?;

        let state = ApiState::new(self.config.error_verbosity, store, metrics_handle);

        let app = Self::router(state);

        tracing::info!(addr = %self.config.socket_address, "Starting server");

        let listener = TcpListener::bind(&self.config.socket_address)
            .await
            .context("Bind failed")?;

        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server failed")?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");

        tracing::info!("CTRL+C received");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM signal handler")
            .recv()
            .await;

        tracing::info!("SIGTERM received");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}

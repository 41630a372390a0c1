//! apiview-server: standalone API-documentation server.
//!
//! Hosts the viewer asset bundle, serves the OpenAPI document, generates the
//! viewer initializer, and reverse-proxies the viewer's API calls to the
//! configured API origin.

mod config;
mod docs;
mod middleware;
mod proxy;
mod state;

use crate::config::{Environment, ServerConfig};
use crate::state::{AppState, LifecycleState};
use anyhow::Context as _;
use apiview_spec_tools::document::SpecDocument;
use axum::Router;
use clap::Parser as _;
use std::net::SocketAddr;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();
    init_tracing(config.environment);

    let state = build_state(config).await?;
    let listen_addr = state.config().listen_addr;
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .with_context(|| format!("bind {listen_addr}"))?;

    state.set_lifecycle(LifecycleState::Running);
    info!(addr = %listen_addr, "docs server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(state.clone()))
    .await
    .context("serve")?;

    state.set_lifecycle(LifecycleState::Stopped);
    info!("graceful shutdown completed");
    Ok(())
}

fn init_tracing(environment: Environment) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if environment.is_development() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    }
}

async fn build_state(config: ServerConfig) -> anyhow::Result<AppState> {
    if !config.ui_dir.is_dir() {
        anyhow::bail!(
            "viewer asset directory not found: {} (place the Swagger UI bundle there)",
            config.ui_dir.display()
        );
    }

    let client = reqwest::Client::new();
    let spec = SpecDocument::load(
        &config.spec_path,
        &client,
        config.spec_digest.as_deref(),
        config.spec_digest_policy,
    )
    .await
    .context("load OpenAPI document")?;

    let page_origin = config.page_origin()?;
    let viewer = config.viewer_config();
    info!(
        spec = %config.spec_path,
        api_origin = %config.api_origin,
        ui_dir = %config.ui_dir.display(),
        "configuration loaded"
    );

    Ok(AppState::new(config, viewer, spec, page_origin, client))
}

fn router(state: AppState) -> Router {
    Router::new()
        .merge(docs::router())
        .fallback(proxy::forward)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::cors,
        ))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .with_state(state)
}

async fn shutdown_signal(state: AppState) {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install interrupt handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = interrupt => {}
        () = terminate => {}
    }

    state.set_lifecycle(LifecycleState::ShuttingDown);
    info!("initiating graceful shutdown");
}

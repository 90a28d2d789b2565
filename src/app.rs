/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config読み込み → 依存生成 → Router 組み立て
 * - Middleware の適用 (Bearer gate / CORS / security headers / HTTP 共通)
 * - axum::serve() で起動
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::{Router, routing::get};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::v1::handlers::{health::health, method_not_allowed};
use crate::config::Config;
use crate::error::AppError;
use crate::middleware;
use crate::services::identity::build_identity_provider;
use crate::{api, state::AppState};

fn init_tracing() {
    // RUST_LOG=info,bearer_gate=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: fail fast
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env().context("loading configuration")?;
    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting bearer-gate in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let identity = build_identity_provider(&config).context("building identity provider")?;
    let state = AppState::new(identity);
    let app = build_app(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving http")?;

    tracing::info!("shut down");
    Ok(())
}

/// Router with every cross-cutting layer applied, as served in production.
pub fn build_app(state: AppState, config: &Config) -> Router {
    let router = build_router(state);
    let router = security_headers_and_cors(router, config);
    middleware::http::apply(router, config)
}

/// Routes only: `/health` is public, `/api/v1/*` sits behind the bearer gate.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .nest("/api/v1", api::v1::routes(state.clone()))
        .fallback(|| async { AppError::NotFound })
        .with_state(state)
}

fn security_headers_and_cors(router: Router, config: &Config) -> Router {
    let router = middleware::security_headers::apply(router);
    middleware::cors::apply(router, config)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}

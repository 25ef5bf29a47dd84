/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config → dependencies (pool, auth gate) → Router
 * - HTTP middleware, then axum::serve()
 */
use std::{panic, process};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api::{self, v1::dto::app_info::AppInfoResponse},
    config::{AppEnv, Config},
    middleware::{self, http::HttpLimits},
    services::auth::build_auth_gate,
    state::AppState,
};

fn init_tracing(app_env: AppEnv) {
    // RUST_LOG wins; otherwise production is quieter (warnings only).
    let default_filter = if app_env.is_production() {
        "warn,tower_http=warn"
    } else {
        "info,tower_http=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // development: crash loudly; production: keep serving
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    let config = Config::from_env().context("loading configuration")?;

    init_tracing(config.app_env);
    init_panic_hook(!config.app_env.is_production());

    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; using the development fallback key");
    }

    tracing::info!(
        "starting {} {} in {:?} mode on {}",
        config.service_name,
        config.current_version,
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, HttpLimits::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let db = PgPoolOptions::new()
        .max_connections(config.db_pool_size)
        .connect(&config.database_url)
        .await
        .context("connecting to database")?;

    let gate = build_auth_gate(config, db.clone());

    let app_info = AppInfoResponse {
        service_name: config.service_name.clone(),
        version: config.current_version.clone(),
        environment: config.app_env.as_str(),
    };

    Ok(AppState::new(db, gate, app_info))
}

fn build_router(state: AppState, limits: HttpLimits) -> Router {
    let router = api::v1::routes(state.gate.clone()).with_state(state);
    middleware::http::apply(router, limits)
}

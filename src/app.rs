/*
 * Responsibility
 * - load Config -> build dependencies (storage, auth) -> assemble the Router
 * - apply router-wide middleware (CORS / http)
 * - axum::serve() until ctrl-c
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::Config,
    middleware,
    repos::{DrinkRepo, MemoryDrinkRepo, PgDrinkRepo},
    services::auth::build_auth_service,
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,drinks_api=debug,tower_http=debug cargo run
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
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
        // Production: default hook, the server keeps running.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting drinks API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for ctrl-c");
        return;
    }
    tracing::info!("shutting down");
}

/// Build process-level services and inject them into the shared application state.
pub async fn build_state(config: &Config) -> Result<AppState> {
    let drinks: Arc<dyn DrinkRepo> = match &config.database_url {
        Some(url) => {
            let pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            let repo = PgDrinkRepo::new(pool);
            repo.init_schema(config.db_reset_on_start).await?;
            Arc::new(repo)
        }
        None => {
            tracing::warn!("DATABASE_URL is not set; drinks are kept in memory");
            Arc::new(MemoryDrinkRepo::new())
        }
    };

    let auth = build_auth_service(config).await?;

    tracing::info!(storage = drinks.backend_name(), "application state ready");
    Ok(AppState::new(drinks, auth))
}

pub fn build_router(state: AppState, config: &Config) -> Router {
    let router = api::routes().with_state(state);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

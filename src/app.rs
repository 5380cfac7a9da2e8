/*
 * Responsibility
 * - tracing / panic hook setup
 * - Config load -> store clients -> AppState -> Router
 * - Middleware application (CORS preflight, request id, trace, limits)
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::{Context, Result};
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    api,
    config::{Config, HotelStoreConfig},
    middleware,
    repos::{HotelStore, MemoryHotelStore, PgHotelStore},
    services::{
        auth::ClaimsReader,
        storage::{ImageStore, ObjectImageStore},
    },
    state::AppState,
};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,hotel_admin=debug,tower_http=debug cargo run
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
        // Surface panics via tracing so they are not lost with stderr.
        tracing::error!(?info, "panic");

        // Development: crash the whole process so it gets noticed.
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
        "starting hotel admin API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config).await?;
    tracing::debug!(?state, "application state ready");

    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn build_state(config: &Config) -> Result<AppState> {
    let hotels: Arc<dyn HotelStore> = match &config.hotel_store {
        HotelStoreConfig::Postgres { database_url } => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await
                .context("connecting to DATABASE_URL")?;
            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("running migrations")?;
            Arc::new(PgHotelStore::new(pool))
        }
        HotelStoreConfig::Memory => {
            tracing::warn!("hotel records are kept in memory and lost on restart");
            Arc::new(MemoryHotelStore::new())
        }
    };

    let images = ObjectImageStore::new(&config.image_store, &config.bucket_name, &config.region)
        .await
        .context("building image store")?;

    let claims = match &config.token_verification {
        Some(settings) => ClaimsReader::verified(settings).context("loading TOKEN_PUBLIC_KEY_PEM")?,
        None => {
            tracing::warn!(
                "token signatures are not verified; tokens must be verified before they reach this service"
            );
            ClaimsReader::unverified()
        }
    };

    tracing::info!(
        hotel_store = hotels.backend_name(),
        image_store = images.backend_name(),
        bucket = images.bucket(),
        verifying_tokens = claims.is_verifying(),
        "stores ready"
    );

    Ok(AppState::new(
        hotels,
        Arc::new(images),
        Arc::new(claims),
        config.bucket_name.as_str(),
        config.admin_group.as_str(),
    ))
}

fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes())
        .with_state(state);

    let router = middleware::cors::apply(router);
    middleware::http::apply(router, config.max_upload_bytes)
}

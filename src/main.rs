use std::{process, sync::Arc, time::Duration};

use tokio::net::TcpListener;
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

use twine::{
    application::{
        cache::TransformCache,
        error::AppError,
        payloads::PayloadService,
        repos::{HealthProbe, PayloadsRepo, TransformCacheRepo},
        transform::UppercaseTransformer,
    },
    config,
    infra::{
        db::PostgresRepositories,
        error::InfraError,
        http::{self, ApiState},
        memory::MemoryRepositories,
        telemetry,
    },
};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (_cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let storage = init_storage(&settings).await?;
    let api_state = build_api_state(&storage);

    serve_http(&settings, api_state).await
}

enum Storage {
    Postgres(Arc<PostgresRepositories>),
    Memory(Arc<MemoryRepositories>),
}

async fn init_storage(settings: &config::Settings) -> Result<Storage, AppError> {
    match settings.database.url.as_ref() {
        Some(url) => {
            let pool =
                PostgresRepositories::connect(url, settings.database.max_connections.get())
                    .await
                    .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

            PostgresRepositories::run_migrations(&pool)
                .await
                .map_err(|err| AppError::from(InfraError::database(err.to_string())))?;

            info!(target = "twine::startup", "connected to postgres storage");
            Ok(Storage::Postgres(Arc::new(PostgresRepositories::new(pool))))
        }
        None => {
            warn!(
                target = "twine::startup",
                "no database url configured, using volatile in-memory storage"
            );
            Ok(Storage::Memory(Arc::new(MemoryRepositories::new())))
        }
    }
}

fn build_api_state(storage: &Storage) -> ApiState {
    let (cache_repo, payloads_repo, health): (
        Arc<dyn TransformCacheRepo>,
        Arc<dyn PayloadsRepo>,
        Arc<dyn HealthProbe>,
    ) = match storage {
        Storage::Postgres(repos) => (repos.clone(), repos.clone(), repos.clone()),
        Storage::Memory(repos) => (repos.clone(), repos.clone(), repos.clone()),
    };

    let cache = TransformCache::new(cache_repo, Arc::new(UppercaseTransformer));
    let payloads = Arc::new(PayloadService::new(cache, payloads_repo));

    ApiState { payloads, health }
}

async fn serve_http(settings: &config::Settings, state: ApiState) -> Result<(), AppError> {
    let router = http::build_api_router(state);

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;
    info!(target = "twine::startup", addr = %settings.server.addr, "listening");

    spawn_shutdown_watchdog(settings.server.graceful_shutdown);

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(target = "twine::http", error = %err, "failed to listen for shutdown signal");
        return;
    }
    info!(target = "twine::http", "shutdown signal received, draining connections");
}

/// Force the process down if draining outlives the configured grace period.
fn spawn_shutdown_watchdog(grace: Duration) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            return;
        }
        tokio::time::sleep(grace).await;
        error!(
            target = "twine::http",
            grace_secs = grace.as_secs(),
            "graceful shutdown deadline exceeded, aborting"
        );
        process::exit(1);
    });
}

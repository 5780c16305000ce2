//! Fraud Scoring Server entry point

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fraud_scoring::{
    config::{Config, StoreBackend},
    create_router, db,
    pipeline::Pipeline,
    scoring::ScoringClient,
    store::{MemoryStore, PgRecordStore, RecordStore},
    AppState,
};

#[tokio::main]
async fn main() {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fraud_scoring=debug,tower_http=debug".into());
    let json_logs = std::env::var("LOG_FORMAT").map(|f| f == "json").unwrap_or(false);
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = Config::from_env();

    if let Err(e) = run(config).await {
        tracing::error!("Fatal: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> anyhow::Result<()> {
    tracing::info!("Fraud Scoring Server starting...");

    let store = open_store(&config).await?;

    let scorer = ScoringClient::new(
        config.scoring_url.clone(),
        config.fraud_threshold,
        config.scoring_timeout,
    )
    .context("Failed to create scoring client")?;
    tracing::info!(
        "Model serving: {} (threshold {}, timeout {:?})",
        scorer.url(), scorer.threshold(), config.scoring_timeout
    );

    let pipeline = Arc::new(Pipeline::new(
        store.clone(),
        scorer,
        config.namespace.clone(),
        config.set_name.clone(),
    ));

    // Build application state
    let state = AppState {
        pipeline,
        config: config.clone(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("🚀 Server listening on http://{}", addr);

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    // Release the store whether or not serving ended cleanly
    store.close().await;
    served.context("Server error")?;

    tracing::info!("Fraud Scoring Server stopped");
    Ok(())
}

/// Connect the configured record store; failure here is fatal
async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn RecordStore>> {
    match config.store_backend {
        StoreBackend::Postgres => {
            tracing::info!("Record store: {}", config.database_url.split('@').last().unwrap_or("***"));

            let pool = db::create_pool(&config.database_url, config.store_max_connections)
                .await
                .context("Failed to create database pool")?;

            tracing::info!("Running database migrations...");
            db::run_migrations(&pool)
                .await
                .context("Failed to run migrations")?;

            Ok(Arc::new(PgRecordStore::new(pool)))
        }
        StoreBackend::Memory => {
            tracing::warn!("Record store: in-memory, records are lost on exit");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

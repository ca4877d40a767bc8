mod analysis;
mod config;
mod db;
mod errors;
mod extract;
mod history;
mod models;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::scorer::{FlatBonusScorer, ResumeScorer, WeightedRubricScorer};
use crate::config::{Config, ScoringModel};
use crate::db::{create_pool, ensure_schema};
use crate::history::postgres::PostgresHistoryStore;
use crate::history::HistoryStore;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL and bootstrap the analyses schema
    let pool = create_pool(&config.database_url).await?;
    ensure_schema(&pool).await?;

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    let store: Arc<dyn HistoryStore> = Arc::new(PostgresHistoryStore::new(
        pool,
        s3,
        config.s3_bucket.clone(),
    ));

    // The scoring model is fixed per deployment; the two variants are never mixed.
    let scorer: Arc<dyn ResumeScorer> = match config.scoring_model {
        ScoringModel::Weighted => Arc::new(WeightedRubricScorer),
        ScoringModel::Flat => Arc::new(FlatBonusScorer),
    };
    info!("Scoring model: {}", scorer.name());

    // Build app state
    let state = AppState { store, scorer };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "resume-analyzer-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}

use std::net::SocketAddr;

use anyhow::Context;
use axum::{Router, middleware, routing::get};
use foco_api::{config::ApiConfig, state::ApiState};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, the variables may come from the environment
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env().context("invalid configuration")?;

    foco_api::tracing::init_tracing(&config.env);
    let metrics_handle = foco_api::metrics::init_metrics()?;

    let pool = foco_db::create_pool(&config.database_url, config.db_max_connections).await?;
    foco_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
    tracing::info!("database ready, migrations applied");

    let state = ApiState::new(&config, pool)?;
    let environment = state.environment;

    let cors = foco_api::middleware::cors::create_cors_layer(&config.allowed_origins());

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(foco_api::metrics::metrics_handler))
        .with_state(metrics_handle);

    let app = foco_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(foco_api::metrics::track_metrics))
        .layer(middleware::from_fn(
            foco_api::middleware::request_id::request_id_middleware,
        ))
        .layer(middleware::from_fn(move |req, next| {
            foco_api::middleware::security_headers::security_headers_middleware(
                environment,
                req,
                next,
            )
        }));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(environment = ?config.env, %addr, "foco API listening");

    // Peer addresses feed the per-IP rate limiter
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

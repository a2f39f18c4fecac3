use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::analysis::{AnalysisResponse, Analyzer};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    middleware,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

use super::error::{ApiError, GENERIC_INTERNAL_ERROR};
use super::metrics::{metrics_handler, record_error};
use super::{log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct HomeResponse {
    message: &'static str,
    uptime: String,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Deserialize, Debug)]
struct AnalyzeBody {
    pub text: String,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    Json(HomeResponse {
        message: state.analyzer.variant().liveness_message(),
        uptime: format_uptime(state.start_time.elapsed()),
    })
}

async fn analyze(
    State(state): State<ServerState>,
    body: Result<Json<AnalyzeBody>, JsonRejection>,
) -> Result<Json<AnalysisResponse>, ApiError> {
    let Json(body) = body?;

    match state.analyzer.analyze(&body.text).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            error!("Analysis failed: {}", err);
            record_error(err.kind());
            let detail = if state.config.expose_error_details {
                err.to_string()
            } else {
                GENERIC_INTERNAL_ERROR.to_string()
            };
            Err(ApiError::internal(detail))
        }
    }
}

fn make_cors_layer(origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("Invalid CORS origin: {:?}", origin))?;
    // Credentials forbid wildcards, so methods and headers mirror the preflight.
    // Other origins get no Access-Control-Allow-Origin header.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub fn make_app(config: ServerConfig, analyzer: Arc<Analyzer>) -> Result<Router> {
    let cors = make_cors_layer(&config.cors_origin)?;
    let logging_level = config.requests_logging_level.clone();
    let state = ServerState::new(config, analyzer);

    let app: Router = Router::new()
        .route("/", get(home))
        .route("/analyze/", post(analyze))
        .route("/analyze", post(analyze))
        .with_state(state)
        .layer(cors)
        .layer(middleware::from_fn_with_state(logging_level, log_requests));

    Ok(app)
}

fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(config: ServerConfig, analyzer: Arc<Analyzer>) -> Result<()> {
    let address = format!("{}:{}", config.host, config.port);
    let metrics_address = format!("{}:{}", config.host, config.metrics_port);
    let app = make_app(config, analyzer)?;

    let metrics_listener = tokio::net::TcpListener::bind(&metrics_address)
        .await
        .with_context(|| format!("Failed to bind metrics server to {}", metrics_address))?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!("Listening on {}", address);
    axum::serve(listener, app).await?;
    Ok(())
}

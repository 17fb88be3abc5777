// Swedish Party Leaders - Web Server
// Serves the scatter chart and the prepared records over HTTP

use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use party_leaders::chart::TITLE;
use party_leaders::{
    check, party_summaries, render_svg, run, ChartSpec, Party, PartyLeader, PartySummary,
    DEFAULT_INPUT,
};

/// Shared application state, prepared once at startup
#[derive(Clone)]
struct AppState {
    leaders: Arc<Vec<PartyLeader>>,
    summaries: Arc<Vec<PartySummary>>,
    svg: Arc<String>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }

    fn err(data: T, error: String) -> Self {
        Self {
            success: false,
            data,
            error: Some(error),
        }
    }
}

#[derive(Deserialize)]
struct LeadersQuery {
    party: Option<String>,
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/leaders?party=S - Prepared records, optionally for one party
async fn get_leaders(
    State(state): State<AppState>,
    Query(query): Query<LeadersQuery>,
) -> impl IntoResponse {
    let party = match query.party.as_deref().map(str::parse::<Party>).transpose() {
        Ok(party) => party,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::err(Vec::<PartyLeader>::new(), e.to_string())),
            )
                .into_response();
        }
    };

    let leaders: Vec<PartyLeader> = state
        .leaders
        .iter()
        .filter(|l| party.map_or(true, |p| l.party_abr == p))
        .cloned()
        .collect();

    (StatusCode::OK, Json(ApiResponse::ok(leaders))).into_response()
}

/// GET /api/summary - Per-party statistics
async fn get_summary(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.summaries.as_ref().clone()))
}

/// GET /chart.svg - The chart itself
async fn serve_svg(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "image/svg+xml; charset=utf-8")],
        state.svg.as_ref().clone(),
    )
}

/// GET / - HTML page embedding the chart
async fn serve_index(State(state): State<AppState>) -> impl IntoResponse {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"sv\"><head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}</body></html>\n",
        TITLE, state.svg
    ))
}

fn build_router(state: AppState) -> Router {
    // Build API routes
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/leaders", get(get_leaders))
        .route("/summary", get(get_summary))
        .with_state(state.clone());

    // Build main router
    Router::new()
        .route("/", get(serve_index))
        .route("/chart.svg", get(serve_svg))
        .with_state(state)
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Main Server
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let csv_path = std::env::var("PARTY_LEADERS_CSV")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_INPUT));
    let addr = std::env::var("PARTY_LEADERS_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    let now = Local::now().date_naive();
    let leaders = run(&csv_path, now)
        .with_context(|| format!("Failed to prepare party leaders from {}", csv_path.display()))?;
    check(&leaders, now);

    let state = AppState {
        summaries: Arc::new(party_summaries(&leaders)),
        svg: Arc::new(render_svg(&ChartSpec::from_leaders(&leaders))),
        leaders: Arc::new(leaders),
    };

    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!(%addr, "server running");
    info!("chart: http://{}/  api: http://{}/api/leaders", addr, addr);

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}

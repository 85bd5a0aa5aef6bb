use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use server_api::list_applications;
use shared::{
    domain::Application,
    error::ApiError,
    protocol::{ListQuery, APPLICATIONS_ROUTE, TOTAL_COUNT_HEADER},
};
use tracing::{info, warn};

mod app_state;
mod config;

use app_state::AppState;
use config::{load_catalogue, load_settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let api = load_catalogue(&settings)?;
    let app = build_router(Arc::new(AppState { api }));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(APPLICATIONS_ROUTE, get(http_list_applications))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn http_list_applications(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<(HeaderMap, Json<Vec<Application>>), (StatusCode, Json<ApiError>)> {
    let page = list_applications(&state.api, query).map_err(|e| {
        warn!(?query, error = %e.message, "rejected listing request");
        (StatusCode::BAD_REQUEST, Json(e))
    })?;

    let mut headers = HeaderMap::new();
    headers.insert(TOTAL_COUNT_HEADER, HeaderValue::from(page.total_count));
    headers.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static(TOTAL_COUNT_HEADER),
    );
    Ok((headers, Json(page.items)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;

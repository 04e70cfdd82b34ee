use axum::extract::FromRef;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

pub mod config;
pub mod db;
pub mod error;
pub mod graph;
pub mod pages;
pub mod pagination;
pub mod resolver;
pub mod twitter;

use config::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    settings: Settings,
}

impl FromRef<AppState> for Settings {
    fn from_ref(app_state: &AppState) -> Settings {
        app_state.settings.clone()
    }
}

/// Assemble the application router.
pub fn router(settings: Settings) -> Router {
    let app_state = AppState { settings };

    let api_router = Router::new()
        .route("/query-graph", post(graph::handler::query_graph))
        .route("/resolve-users", post(resolver::handler::resolve_users));

    Router::new()
        .route("/", get(pages::handler::index))
        .route("/followers", get(pages::handler::followers))
        .route("/followees", get(pages::handler::followees))
        .route("/healthz", get(healthz))
        .nest("/api", api_router)
        .with_state(app_state)
}

/// Liveness probe.
/// GET /healthz
async fn healthz() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use crate::config::settings::Settings;
use crate::db;
use crate::error::AppError;
use crate::twitter::TwitterApi;

use super::engine::{self, ResolveSummary};
use super::{ResolveRequest, ResolveResponse};

/// Refresh profile rows from the social API, one page at a time.
/// POST /api/resolve-users
pub async fn resolve_users(
    State(settings): State<Settings>,
    Json(payload): Json<ResolveRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::UnprocessableEntity(e.to_string()))?;

    // Run failures are part of the endpoint's contract, not HTTP errors:
    // the caller gets a 200 with the error serialized into the body.
    match run(&settings, &payload).await {
        Ok(summary) => {
            tracing::info!(
                pages = summary.pages,
                users_updated = summary.users_updated,
                "resolution run finished"
            );
            Ok(Json(ResolveResponse::succeeded()))
        }
        Err(e) => {
            tracing::error!("Resolution run failed: {e:#}");
            Ok(Json(ResolveResponse::failed(format!("{e:#}"))))
        }
    }
}

async fn run(settings: &Settings, payload: &ResolveRequest) -> anyhow::Result<ResolveSummary> {
    let pool = db::connect(&payload.db.string).await?;
    let api = TwitterApi::new(payload.twitter_client.clone(), &settings.twitter_api_base)?;

    engine::resolve_users(
        &pool,
        &api,
        payload.group,
        payload.limit,
        payload.offset,
        payload.count,
        settings.resolve_delay,
    )
    .await
}

use axum::{response::IntoResponse, Json};

use crate::{
    db,
    error::AppError,
    graph::{
        query, GraphQueryResponse, GraphTable, QueryGraphRequest, SortColumn, SortDirection,
        MAX_PAGE_ROWS,
    },
};

/// Return a capped, sorted page of graph rows.
/// POST /api/query-graph
///
/// An absent or key-less credential bundle short-circuits to an empty result
/// before any database connection is attempted.
pub async fn query_graph(
    Json(payload): Json<QueryGraphRequest>,
) -> Result<impl IntoResponse, AppError> {
    let has_credentials = payload
        .twitter_client
        .as_ref()
        .is_some_and(|credentials| credentials.has_consumer_key());

    if !has_credentials {
        return Ok(Json(GraphQueryResponse::empty()));
    }

    let db_string = payload
        .db_string
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("dbString is required".to_string()))?;

    let pool = db::connect(db_string).await.map_err(|e| {
        tracing::error!("Graph query connection error: {e:#}");
        AppError::Database(format!("{e:#}"))
    })?;

    let table = payload.table.unwrap_or(GraphTable::Followers);
    let limit = payload.limit.unwrap_or(MAX_PAGE_ROWS).clamp(0, MAX_PAGE_ROWS);
    let offset = payload.offset.unwrap_or(0).max(0);
    let sort = payload.sort.unwrap_or(SortColumn::FollowersCount);
    let direction = payload.direction.unwrap_or(SortDirection::Desc);

    let followers = query::graph_page(&pool, table, limit, offset, sort, direction)
        .await
        .map_err(|e| {
            tracing::error!("Graph query error: {e:#}");
            AppError::Database(format!("{e:#}"))
        })?;

    Ok(Json(GraphQueryResponse { followers }))
}

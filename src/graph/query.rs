use anyhow::{Context, Result};
use sqlx::PgPool;

use super::{GraphTable, GraphUser, SortColumn, SortDirection};

const USER_COLUMNS: &str = "id, name, username, location, description, url, \
     followers_count, followees_count, verified, statuses_count, language, \
     background_image, profile_image, banner_image, following_me, followed_by_me";

/// Identifiers come from the whitelist enums; limit and offset are bound.
fn select_statement(table: GraphTable, sort: SortColumn, direction: SortDirection) -> String {
    format!(
        "SELECT {USER_COLUMNS} FROM {} ORDER BY {} {} LIMIT $1 OFFSET $2",
        table.as_str(),
        sort.as_str(),
        direction.as_sql()
    )
}

/// Fetch one ordered page of graph rows.
pub async fn graph_page(
    pool: &PgPool,
    table: GraphTable,
    limit: i64,
    offset: i64,
    sort: SortColumn,
    direction: SortDirection,
) -> Result<Vec<GraphUser>> {
    let statement = select_statement(table, sort, direction);

    sqlx::query_as::<_, GraphUser>(&statement)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await
        .with_context(|| format!("graph query on {} failed", table.as_str()))
}

/// Total rows in a graph table, used to drive pagers and resolution bounds.
pub async fn count_rows(pool: &PgPool, table: GraphTable) -> Result<i64> {
    let statement = format!("SELECT COUNT(*) FROM {}", table.as_str());

    sqlx::query_scalar(&statement)
        .fetch_one(pool)
        .await
        .with_context(|| format!("row count on {} failed", table.as_str()))
}

use std::time::Duration;

use anyhow::{ensure, Result};
use async_trait::async_trait;

use crate::graph::GraphTable;
use crate::twitter::TwitterUser;

use super::ResolvedUser;

/// Row access the resolution loop needs from the graph database.
#[async_trait]
pub trait GraphStore {
    async fn select_user_ids(
        &self,
        table: GraphTable,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<i64>>;

    async fn update_user(&self, table: GraphTable, user: &ResolvedUser) -> Result<()>;
}

/// Bulk profile lookup against the external API.
#[async_trait]
pub trait UserDirectory {
    async fn lookup_users(&self, ids: &[i64]) -> Result<Vec<TwitterUser>>;
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    pub pages: u32,
    pub users_updated: u64,
}

/// Walk the graph table in id order and refresh each row from the directory.
///
/// Pages are strictly sequential: a page is selected, looked up, and written
/// back before the next one starts, with `delay` between pages to stay under
/// the API rate limit. The run stops once `count` rows have been covered, or
/// earlier if the table runs out of rows. Any page failure aborts the run.
pub async fn resolve_users<S, D>(
    store: &S,
    directory: &D,
    table: GraphTable,
    limit: i64,
    offset: i64,
    count: i64,
    delay: Duration,
) -> Result<ResolveSummary>
where
    S: GraphStore + Sync,
    D: UserDirectory + Sync,
{
    ensure!(limit > 0, "page size must be positive");

    let mut summary = ResolveSummary::default();
    let mut current = offset;

    while current < count {
        tracing::info!(
            table = table.as_str(),
            offset = current,
            limit,
            "resolving user batch"
        );

        let ids = store.select_user_ids(table, limit, current).await?;
        if ids.is_empty() {
            tracing::warn!(
                table = table.as_str(),
                offset = current,
                "no rows left before reaching count, stopping early"
            );
            break;
        }

        let users = directory.lookup_users(&ids).await?;
        if users.len() < ids.len() {
            tracing::debug!(
                requested = ids.len(),
                returned = users.len(),
                "lookup returned fewer records than requested"
            );
        }

        for user in users {
            let resolved = ResolvedUser::from_lookup(user, table);
            store.update_user(table, &resolved).await?;
            summary.users_updated += 1;
        }

        summary.pages += 1;
        current += limit;

        if current < count {
            tracing::debug!(delay_ms = delay.as_millis() as u64, "pausing before next batch");
            tokio::time::sleep(delay).await;
        }
    }

    Ok(summary)
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;

use crate::graph::GraphTable;

use super::engine::GraphStore;
use super::ResolvedUser;

fn select_ids_statement(table: GraphTable) -> String {
    format!(
        "SELECT id FROM {} ORDER BY id ASC LIMIT $1 OFFSET $2",
        table.as_str()
    )
}

fn update_statement(table: GraphTable) -> String {
    format!(
        "UPDATE {} SET name = $1, username = $2, location = $3, description = $4, \
 url = $5, followers_count = $6, followees_count = $7, verified = $8, \
 statuses_count = $9, language = $10, background_image = $11, profile_image = $12, \
 banner_image = $13, following_me = $14, followed_by_me = $15 WHERE id = $16",
        table.as_str()
    )
}

#[async_trait]
impl GraphStore for PgPool {
    async fn select_user_ids(
        &self,
        table: GraphTable,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<i64>> {
        sqlx::query_scalar(&select_ids_statement(table))
            .bind(limit)
            .bind(offset)
            .fetch_all(self)
            .await
            .with_context(|| format!("failed to select ids from {}", table.as_str()))
    }

    async fn update_user(&self, table: GraphTable, user: &ResolvedUser) -> Result<()> {
        sqlx::query(&update_statement(table))
            .bind(&user.name)
            .bind(&user.username)
            .bind(&user.location)
            .bind(&user.description)
            .bind(&user.url)
            .bind(user.followers_count)
            .bind(user.followees_count)
            .bind(user.verified)
            .bind(user.statuses_count)
            .bind(&user.language)
            .bind(&user.background_image)
            .bind(&user.profile_image)
            .bind(&user.banner_image)
            .bind(user.following_me)
            .bind(user.followed_by_me)
            .bind(user.id)
            .execute(self)
            .await
            .with_context(|| {
                format!("failed to update user {} in {}", user.id, table.as_str())
            })?;

        Ok(())
    }
}

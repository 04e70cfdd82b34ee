use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Request-scoped pools stay small; they live only for one request.
const MAX_CONNECTIONS: u32 = 5;

/// Parse a connection string and open a pool for the current request.
pub async fn connect(conn_string: &str) -> Result<PgPool> {
    let options =
        PgConnectOptions::from_str(conn_string).context("invalid database connection string")?;

    let pool = PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .connect_with(options)
        .await
        .context("database connection failed")?;

    Ok(pool)
}

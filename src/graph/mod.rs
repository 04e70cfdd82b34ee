use serde::{Deserialize, Serialize};

use crate::twitter::TwitterCredentials;

pub mod handler;
pub mod query;

/// Hard cap on rows returned by a single graph query.
pub const MAX_PAGE_ROWS: i64 = 100;

/// The two mirrored graph tables. Serving as a whitelist: only these names
/// ever reach the SQL text, and unknown names are rejected when the request
/// body is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphTable {
    Followers,
    Followees,
}

impl GraphTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            GraphTable::Followers => "followers",
            GraphTable::Followees => "followees",
        }
    }
}

/// Columns a graph query may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortColumn {
    Id,
    Name,
    Username,
    FollowersCount,
    FolloweesCount,
    StatusesCount,
}

impl SortColumn {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::Username => "username",
            SortColumn::FollowersCount => "followers_count",
            SortColumn::FolloweesCount => "followees_count",
            SortColumn::StatusesCount => "statuses_count",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// One mirrored user row. Every attribute column is nullable: rows arrive
/// with only the id set and stay that way until the resolver fills them in.
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct GraphUser {
    pub id: i64,
    pub name: Option<String>,
    pub username: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub followers_count: Option<i64>,
    pub followees_count: Option<i64>,
    pub verified: Option<bool>,
    pub statuses_count: Option<i64>,
    pub language: Option<String>,
    pub background_image: Option<String>,
    pub profile_image: Option<String>,
    pub banner_image: Option<String>,
    pub following_me: Option<bool>,
    pub followed_by_me: Option<bool>,
}

/// Request payload for the graph query endpoint. Wire names are camelCase
/// (`dbString`, `twitterClient`).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryGraphRequest {
    pub db_string: Option<String>,
    pub twitter_client: Option<TwitterCredentials>,
    pub table: Option<GraphTable>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub sort: Option<SortColumn>,
    pub direction: Option<SortDirection>,
}

#[derive(Debug, Serialize)]
pub struct GraphQueryResponse {
    pub followers: Vec<GraphUser>,
}

impl GraphQueryResponse {
    pub fn empty() -> Self {
        Self {
            followers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_names_round_trip_through_the_whitelist() {
        for (raw, table) in [
            ("\"followers\"", GraphTable::Followers),
            ("\"followees\"", GraphTable::Followees),
        ] {
            let parsed: GraphTable = serde_json::from_str(raw).unwrap();
            assert_eq!(parsed, table);
        }
    }

    #[test]
    fn unknown_table_names_are_rejected() {
        for raw in ["\"users\"", "\"followers; DROP TABLE followers\"", "\"\""] {
            assert!(serde_json::from_str::<GraphTable>(raw).is_err(), "{raw} accepted");
        }
    }

    #[test]
    fn sort_identifiers_are_rejected_outside_the_whitelist() {
        assert!(serde_json::from_str::<SortColumn>("\"followers_count\"").is_ok());
        assert!(serde_json::from_str::<SortColumn>("\"id\"").is_ok());
        assert!(serde_json::from_str::<SortColumn>("\"password\"").is_err());
        assert!(serde_json::from_str::<SortColumn>("\"id ASC; --\"").is_err());

        assert!(serde_json::from_str::<SortDirection>("\"desc\"").is_ok());
        assert!(serde_json::from_str::<SortDirection>("\"descending\"").is_err());
    }
}

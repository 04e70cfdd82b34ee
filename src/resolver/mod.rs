use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::graph::GraphTable;
use crate::twitter::{TwitterCredentials, TwitterUser};

pub mod engine;
pub mod handler;
pub mod store;

/// Database half of the resolve payload, `{"db": {"string": "..."}}` on the
/// wire.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub string: String,
}

/// Request payload for a resolution run. `group` names the target graph
/// table on the wire.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRequest {
    pub db: DatabaseConfig,
    pub twitter_client: TwitterCredentials,
    pub group: GraphTable,
    /// Page size; the bulk lookup accepts at most 100 ids per call.
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: i64,
    #[serde(default)]
    #[validate(range(min = 0, message = "offset cannot be negative"))]
    pub offset: i64,
    #[validate(range(min = 0, message = "count cannot be negative"))]
    pub count: i64,
}

/// Outcome payload. Success is `{"error": null, "success": true}`; a failed
/// run carries only the serialized error.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
}

impl ResolveResponse {
    pub fn succeeded() -> Self {
        Self {
            error: None,
            success: Some(true),
        }
    }

    pub fn failed(message: String) -> Self {
        Self {
            error: Some(message),
            success: None,
        }
    }
}

/// A lookup record mapped into the local schema, with every absent field
/// already substituted.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUser {
    pub id: i64,
    pub name: String,
    pub username: String,
    pub location: String,
    pub description: String,
    pub url: String,
    pub followers_count: i64,
    pub followees_count: i64,
    pub verified: Option<bool>,
    pub statuses_count: i64,
    pub language: String,
    pub background_image: String,
    pub profile_image: String,
    pub banner_image: String,
    pub following_me: Option<bool>,
    pub followed_by_me: Option<bool>,
}

impl ResolvedUser {
    /// Map an API record into the local schema. Substitution is typed: text
    /// fields fall back to the empty string, numeric fields to zero, and
    /// boolean fields stay NULL. The relationship flags come from the table
    /// the row belongs to, not from the API.
    pub fn from_lookup(user: TwitterUser, table: GraphTable) -> Self {
        Self {
            id: user.id,
            name: text(user.name),
            username: text(user.screen_name),
            location: text(user.location),
            description: text(user.description),
            url: text(user.url),
            followers_count: numeric(user.followers_count),
            followees_count: numeric(user.friends_count),
            verified: user.verified,
            statuses_count: numeric(user.statuses_count),
            language: text(user.lang),
            background_image: text(user.profile_background_image_url_https),
            profile_image: text(user.profile_image_url_https),
            banner_image: text(user.profile_banner_url),
            following_me: Some(table == GraphTable::Followers),
            followed_by_me: Some(table == GraphTable::Followees),
        }
    }
}

fn text(value: Option<String>) -> String {
    value.unwrap_or_default()
}

fn numeric(value: Option<i64>) -> i64 {
    value.unwrap_or(0)
}

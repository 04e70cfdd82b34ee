use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::OnceCell;

use crate::resolver::engine::UserDirectory;

/// Request timeout on every social-API call.
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(60);

/// Credential bundle sent by clients. Field names follow the wire format
/// (`consumerKey`, ...); every field defaults to empty when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TwitterCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl TwitterCredentials {
    pub fn has_consumer_key(&self) -> bool {
        !self.consumer_key.is_empty()
    }
}

/// One user record from the bulk lookup response. Only the fields the local
/// schema cares about are kept; everything else in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwitterUser {
    pub id: i64,
    pub name: Option<String>,
    pub screen_name: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub followers_count: Option<i64>,
    pub friends_count: Option<i64>,
    pub listed_count: Option<i64>,
    pub created_at: Option<String>,
    pub favourites_count: Option<i64>,
    pub verified: Option<bool>,
    pub statuses_count: Option<i64>,
    pub lang: Option<String>,
    pub profile_background_image_url_https: Option<String>,
    pub profile_image_url_https: Option<String>,
    pub profile_banner_url: Option<String>,
}

#[derive(Deserialize)]
struct BearerToken {
    access_token: String,
}

/// Authenticated client for the social API. Built once per request and
/// dropped with it; the application-only bearer token is fetched lazily on
/// the first lookup and reused for the rest of the request.
pub struct TwitterApi {
    http: Client,
    credentials: TwitterCredentials,
    base_url: String,
    bearer: OnceCell<String>,
}

impl TwitterApi {
    pub fn new(credentials: TwitterCredentials, base_url: &str) -> Result<Self> {
        let http = Client::builder()
            .timeout(LOOKUP_TIMEOUT)
            .build()
            .context("failed to build social API client")?;

        Ok(Self {
            http,
            credentials,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: OnceCell::new(),
        })
    }

    /// Exchange the consumer key pair for an application-only bearer token.
    async fn fetch_bearer_token(&self) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/oauth2/token", self.base_url))
            .basic_auth(
                &self.credentials.consumer_key,
                Some(&self.credentials.consumer_secret),
            )
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .context("bearer token request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("bearer token request rejected ({status}): {body}");
        }

        let token: BearerToken = response
            .json()
            .await
            .context("malformed bearer token response")?;

        Ok(token.access_token)
    }

    async fn bearer_token(&self) -> Result<&str> {
        let token = self
            .bearer
            .get_or_try_init(|| self.fetch_bearer_token())
            .await?;
        Ok(token.as_str())
    }

    /// Bulk-fetch profile records for an id batch.
    pub async fn users_lookup(&self, ids: &[i64]) -> Result<Vec<TwitterUser>> {
        let token = self.bearer_token().await?;

        let response = self
            .http
            .get(format!("{}/1.1/users/lookup.json", self.base_url))
            .query(&[("user_id", user_id_param(ids))])
            .bearer_auth(token)
            .send()
            .await
            .context("users/lookup request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("users/lookup rejected ({status}): {body}");
        }

        response
            .json::<Vec<TwitterUser>>()
            .await
            .context("malformed users/lookup response")
    }
}

#[async_trait::async_trait]
impl UserDirectory for TwitterApi {
    async fn lookup_users(&self, ids: &[i64]) -> Result<Vec<TwitterUser>> {
        self.users_lookup(ids).await
    }
}

/// Comma-joined id list, the format the lookup endpoint expects.
fn user_id_param(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

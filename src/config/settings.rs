use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::twitter::TwitterCredentials;

/// Default pause between resolver batches, sized for the upstream rate limit.
const DEFAULT_RESOLVE_DELAY_MS: u64 = 2000;

const DEFAULT_TWITTER_API_BASE: &str = "https://api.twitter.com";

#[derive(Clone)]
pub struct Settings {
    pub port: u16,
    pub addr: SocketAddr,
    /// Connection string used by the server-rendered pages. The JSON API
    /// receives its connection string per request instead.
    pub database_url: Option<String>,
    /// Credential bundle used by the server-rendered pages, if configured.
    pub twitter_credentials: Option<TwitterCredentials>,
    pub twitter_api_base: String,
    pub resolve_delay: Duration,
}

impl Settings {
    pub fn new() -> Self {
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(3000);
        let addr = SocketAddr::from(([0, 0, 0, 0], port));

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());

        let twitter_credentials = env::var("TWITTER_CONSUMER_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .map(|consumer_key| TwitterCredentials {
                consumer_key,
                consumer_secret: env::var("TWITTER_CONSUMER_SECRET").unwrap_or_default(),
                access_token: env::var("TWITTER_ACCESS_TOKEN").unwrap_or_default(),
                access_token_secret: env::var("TWITTER_ACCESS_TOKEN_SECRET").unwrap_or_default(),
            });

        let twitter_api_base = env::var("TWITTER_API_BASE")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_TWITTER_API_BASE.to_string());

        let resolve_delay_ms: u64 = env::var("RESOLVE_DELAY_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_RESOLVE_DELAY_MS);

        Self {
            port,
            addr,
            database_url,
            twitter_credentials,
            twitter_api_base,
            resolve_delay: Duration::from_millis(resolve_delay_ms),
        }
    }
}

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use crate::graph::{GraphTable, GraphUser};

pub mod handler;

/// Rows shown per graph page.
pub const PAGE_SIZE: i64 = 100;

/// One rendered table row, display fallbacks already applied.
pub struct UserRow {
    pub name: String,
    pub username: String,
    pub location: String,
    pub followers_count: i64,
    pub followees_count: i64,
    pub statuses_count: i64,
    pub verified: bool,
}

impl From<GraphUser> for UserRow {
    fn from(user: GraphUser) -> Self {
        Self {
            name: user.name.unwrap_or_default(),
            username: user.username.unwrap_or_default(),
            location: user.location.unwrap_or_default(),
            followers_count: user.followers_count.unwrap_or(0),
            followees_count: user.followees_count.unwrap_or(0),
            statuses_count: user.statuses_count.unwrap_or(0),
            verified: user.verified.unwrap_or(false),
        }
    }
}

/// Index page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub configured: bool,
}

/// Followers/followees page template.
#[derive(Template)]
#[template(path = "graph.html")]
pub struct GraphPageTemplate {
    pub title: &'static str,
    pub path: &'static str,
    pub configured: bool,
    pub error: bool,
    pub users: Vec<UserRow>,
    pub count: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl GraphPageTemplate {
    /// A page with no rows yet; the handler fills rows and counts in once
    /// the query succeeds.
    pub fn new(table: GraphTable, page: i64, configured: bool) -> Self {
        let (title, path) = match table {
            GraphTable::Followers => ("Followers", "/followers"),
            GraphTable::Followees => ("Followees", "/followees"),
        };

        Self {
            title,
            path,
            configured,
            error: false,
            users: Vec::new(),
            count: 0,
            page,
            total_pages: 1,
        }
    }
}

/// Wrapper to render askama templates as axum responses.
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(rendered) => Html(rendered).into_response(),
            Err(err) => {
                tracing::error!(error = %err, "Template render failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

use axum::extract::{Query, State};
use axum::response::IntoResponse;

use crate::config::settings::Settings;
use crate::db;
use crate::graph::{query, GraphTable, GraphUser, SortColumn, SortDirection};
use crate::pagination::{pagination_variables, PageQuery, PaginationVariables};

use super::{GraphPageTemplate, HtmlTemplate, IndexTemplate, UserRow, PAGE_SIZE};

/// Index page
/// GET /
pub async fn index(State(settings): State<Settings>) -> impl IntoResponse {
    HtmlTemplate(IndexTemplate {
        configured: is_configured(&settings),
    })
}

/// Followers page
/// GET /followers
pub async fn followers(
    State(settings): State<Settings>,
    Query(page): Query<PageQuery>,
) -> impl IntoResponse {
    render_graph(GraphTable::Followers, settings, page).await
}

/// Followees page
/// GET /followees
pub async fn followees(
    State(settings): State<Settings>,
    Query(page): Query<PageQuery>,
) -> impl IntoResponse {
    render_graph(GraphTable::Followees, settings, page).await
}

/// Pages browse the mirror only once both the database and the API
/// credentials are configured, matching the graph query short-circuit.
fn is_configured(settings: &Settings) -> bool {
    settings.database_url.is_some()
        && settings
            .twitter_credentials
            .as_ref()
            .is_some_and(|c| c.has_consumer_key())
}

async fn render_graph(
    table: GraphTable,
    settings: Settings,
    page: PageQuery,
) -> HtmlTemplate<GraphPageTemplate> {
    let vars = pagination_variables(PAGE_SIZE, &page);
    let mut template = GraphPageTemplate::new(table, vars.page, is_configured(&settings));

    if template.configured {
        let conn = settings.database_url.as_deref().unwrap_or_default();
        match load_page(conn, table, &vars).await {
            Ok((users, count)) => {
                template.users = users.into_iter().map(UserRow::from).collect();
                template.count = count;
                template.total_pages = ((count + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
            }
            Err(e) => {
                tracing::error!("Graph page query error: {e:#}");
                template.error = true;
            }
        }
    }

    HtmlTemplate(template)
}

async fn load_page(
    conn: &str,
    table: GraphTable,
    vars: &PaginationVariables,
) -> anyhow::Result<(Vec<GraphUser>, i64)> {
    let pool = db::connect(conn).await?;

    let users = query::graph_page(
        &pool,
        table,
        vars.first,
        vars.skip,
        SortColumn::FollowersCount,
        SortDirection::Desc,
    )
    .await?;
    let count = query::count_rows(&pool, table).await?;

    Ok((users, count))
}

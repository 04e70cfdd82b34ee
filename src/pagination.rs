use serde::Deserialize;

/// Query-string parameters accepted by the paginated pages.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Offset/limit pair derived from a page number, plus the page itself for
/// rendering pager controls.
#[derive(Debug, PartialEq, Eq)]
pub struct PaginationVariables {
    pub skip: i64,
    pub first: i64,
    pub page: i64,
}

/// Map a page size and the raw `page` query parameter to skip/limit values.
/// Unspecified or unparsable pages fall back to page 1; out-of-range pages
/// clamp so the skip and pager arithmetic stay within i64.
pub fn pagination_variables(page_size: i64, query: &PageQuery) -> PaginationVariables {
    let page = query
        .page
        .as_deref()
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(1)
        .clamp(1, i64::MAX / page_size.max(1));

    PaginationVariables {
        skip: (page - 1).saturating_mul(page_size),
        first: page_size,
        page,
    }
}

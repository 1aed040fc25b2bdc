//! Pagination engine: query parameters in, clamped window and navigation links out.

use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::domain::page::{Link, LinkRel, MAX_LIMIT, PageMetadata, Pagination, RESERVED_KEYS};
use crate::error::AppError;
use crate::utils::params::any_to_int;

/// Derives the requested window from `page` and `size` query parameters.
///
/// # Defaults
///
/// - `page`: first page
/// - `size`: [`crate::domain::page::LIMIT`]
///
/// # Clamping
///
/// - `page` is one-based on the wire; values below 1 select the first page
/// - `size` at or above [`MAX_LIMIT`] is clamped to it; values below 1 become 1
///
/// # Errors
///
/// Returns [`AppError::InvalidArgument`] if `page` or `size` is not an integer
/// or a string holding one.
pub fn compute_pagination(query: &Map<String, Value>) -> Result<Pagination, AppError> {
    let mut pagination = Pagination::default();

    if let Some(value) = query.get("page").filter(|v| !v.is_null()) {
        let page = any_to_int(value, "page")?;
        pagination.page = if page >= 1 { (page - 1) as usize } else { 0 };
    }

    if let Some(value) = query.get("size").filter(|v| !v.is_null()) {
        let size = any_to_int(value, "size")?;
        pagination.size = if size < MAX_LIMIT as i64 {
            size.max(1) as usize
        } else {
            MAX_LIMIT
        };
    }

    Ok(pagination)
}

/// Builds `self`/`first`/`last` links plus `prev` and `next` where they exist.
///
/// Non-pagination query parameters are carried over into every href.
pub fn navigation_links(
    path: &str,
    query: &Map<String, Value>,
    pagination: Pagination,
    metadata: &PageMetadata,
) -> Vec<Link> {
    let carried: Vec<(&str, String)> = query
        .iter()
        .filter(|(k, v)| !RESERVED_KEYS.contains(&k.as_str()) && !v.is_null())
        .map(|(k, v)| {
            let value = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.as_str(), value)
        })
        .collect();

    let href = |page: usize| {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(carried.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("page", &page.to_string())
            .append_pair("size", &pagination.size.to_string())
            .finish();
        format!("{path}?{query}")
    };

    let current = pagination.page.saturating_add(1);
    let last = metadata.total_pages.max(1);

    let mut links = vec![
        Link::new(LinkRel::SelfRef, href(current)),
        Link::new(LinkRel::First, href(1)),
    ];

    if current > 1 {
        links.push(Link::new(LinkRel::Prev, href(current - 1)));
    }
    if current < metadata.total_pages {
        links.push(Link::new(LinkRel::Next, href(current + 1)));
    }

    links.push(Link::new(LinkRel::Last, href(last)));
    links
}

//! Paged result model returned by list queries.
//!
//! Follows the HAL convention of returning content together with navigation
//! links and page metadata.

use serde::Serialize;
use serde_json::{Map, Value};

/// Default page size.
pub const LIMIT: usize = 50;
/// Largest page size a client may request.
pub const MAX_LIMIT: usize = 100;
/// Default offset of the first page.
pub const OFFSET: usize = 0;

/// Query keys reserved for pagination; never treated as sort or filter keys.
pub const RESERVED_KEYS: [&str; 2] = ["page", "size"];

/// Desired window over a result set.
///
/// `page` is zero-based; `size` is always within `1..=MAX_LIMIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: usize,
    pub size: usize,
}

impl Pagination {
    pub fn new(page: usize, size: usize) -> Self {
        Self {
            page,
            size: size.clamp(1, MAX_LIMIT),
        }
    }

    /// Index of the first element on this page.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(OFFSET.div_ceil(LIMIT), LIMIT)
    }
}

/// Link relation of a navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkRel {
    #[serde(rename = "self")]
    SelfRef,
    First,
    Prev,
    Next,
    Last,
}

/// A navigation link to a related page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub rel: LinkRel,
    pub href: String,
}

impl Link {
    pub fn new(rel: LinkRel, href: impl Into<String>) -> Self {
        Self {
            rel,
            href: href.into(),
        }
    }
}

/// Metadata describing where a page sits in the full result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub total_pages: usize,
    /// One-based.
    pub page_number: usize,
    pub total_elements: usize,
    pub first: bool,
    pub last: bool,
}

impl PageMetadata {
    /// Computes metadata from a SQL-style `limit`/`offset` window and the total `count`.
    ///
    /// `limit` must be positive; a zero limit is treated as one.
    pub fn new(limit: usize, offset: usize, count: usize) -> Self {
        let limit = limit.max(1);
        let total_pages = count.div_ceil(limit);
        let page_number = (offset / limit).saturating_add(1);

        Self {
            total_pages,
            page_number,
            total_elements: count,
            first: page_number == 1,
            last: page_number == total_pages,
        }
    }
}

/// One page of a list query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    content: Vec<T>,
    sort: Map<String, Value>,
    links: Vec<Link>,
    metadata: PageMetadata,
}

impl<T> Page<T> {
    /// Builds a page; `filters` minus the pagination keys become the sort map.
    pub fn new(
        filters: &Map<String, Value>,
        limit: usize,
        offset: usize,
        count: usize,
        content: Vec<T>,
    ) -> Self {
        let sort = filters
            .iter()
            .filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            content,
            sort,
            links: Vec::new(),
            metadata: PageMetadata::new(limit, offset, count),
        }
    }

    /// Returns the same page carrying the given navigation links.
    pub fn with_links(self, links: Vec<Link>) -> Self {
        Self { links, ..self }
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn sort(&self) -> &Map<String, Value> {
        &self.sort
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn metadata(&self) -> &PageMetadata {
        &self.metadata
    }
}

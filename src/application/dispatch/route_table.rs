//! Ordered route table loaded from the declarative route file.
//!
//! # File format
//!
//! ```toml
//! [[routes]]
//! pattern = "/movies(/.*)?"
//! handler = "movies.movie"
//! ```
//!
//! Patterns are regular expressions matched against the whole path. Order is
//! significant: the first matching route wins, so specific patterns go before
//! catch-alls.

use std::fs;
use std::path::Path;

use regex::Regex;
use serde::Deserialize;

use super::{HandlerFn, HandlerRegistry, RouteLoadError};
use crate::error::AppError;

/// One `[[routes]]` entry as written in the route file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteEntry {
    pub pattern: String,
    pub handler: String,
}

#[derive(Debug, Deserialize)]
struct RoutesFile {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

/// A compiled route bound to its handler.
#[derive(Debug, Clone)]
pub struct Route {
    pattern: String,
    regex: Regex,
    handler_name: String,
    handler: HandlerFn,
}

impl Route {
    /// Compiles `pattern` anchored at both ends.
    ///
    /// # Errors
    ///
    /// Returns [`RouteLoadError::InvalidPattern`] if the pattern is not a valid regex.
    pub fn new(
        pattern: impl Into<String>,
        handler_name: impl Into<String>,
        handler: HandlerFn,
    ) -> Result<Self, RouteLoadError> {
        let pattern = pattern.into();
        let regex = Regex::new(&format!("^(?:{pattern})$")).map_err(|source| {
            RouteLoadError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            }
        })?;

        Ok(Self {
            pattern,
            regex,
            handler_name: handler_name.into(),
            handler,
        })
    }

    /// Whether `path` matches this route in full.
    pub fn matches(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn handler_name(&self) -> &str {
        &self.handler_name
    }

    pub fn handler(&self) -> HandlerFn {
        self.handler
    }
}

/// Read-only, ordered set of routes.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Compiles file entries, resolving handler names against `registry`.
    ///
    /// # Errors
    ///
    /// - [`RouteLoadError::Empty`] if there are no entries
    /// - [`RouteLoadError::InvalidPattern`] for a pattern that does not compile
    /// - [`RouteLoadError::UnknownHandler`] for a name missing from the registry
    pub fn from_entries(
        entries: Vec<RouteEntry>,
        registry: &HandlerRegistry,
    ) -> Result<Self, RouteLoadError> {
        if entries.is_empty() {
            return Err(RouteLoadError::Empty);
        }

        let routes = entries
            .into_iter()
            .map(|entry| {
                let handler = registry.get(&entry.handler).ok_or_else(|| {
                    RouteLoadError::UnknownHandler {
                        pattern: entry.pattern.clone(),
                        handler: entry.handler.clone(),
                    }
                })?;
                Route::new(entry.pattern, entry.handler, handler)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(routes))
    }

    /// Parses a TOML route document.
    ///
    /// # Errors
    ///
    /// Returns [`RouteLoadError::Parse`] for malformed TOML, plus every error of
    /// [`Self::from_entries`].
    pub fn from_toml_str(
        source: &str,
        registry: &HandlerRegistry,
    ) -> Result<Self, RouteLoadError> {
        let file: RoutesFile = toml::from_str(source)?;
        Self::from_entries(file.routes, registry)
    }

    /// Reads and parses the route file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteLoadError::Io`] if the file cannot be read, plus every error
    /// of [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>, registry: &HandlerRegistry) -> Result<Self, RouteLoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| RouteLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let table = Self::from_toml_str(&source, registry)?;
        tracing::debug!(path = %path.display(), routes = table.len(), "Route table loaded");
        Ok(table)
    }

    /// Returns the first route whose pattern matches `path` in full.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RouteNotFound`] carrying `path` if nothing matches.
    pub fn resolve(&self, path: &str) -> Result<&Route, AppError> {
        self.routes
            .iter()
            .find(|route| route.matches(path))
            .ok_or_else(|| AppError::route_not_found(path))
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatch::HandlerFuture;
    use crate::application::reply::Reply;
    use crate::domain::request::Request;
    use crate::state::Services;

    fn noop(_: Services, _: Request) -> HandlerFuture {
        Box::pin(async { Ok(Reply::Empty) })
    }

    fn registry() -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        registry
            .register("specific", noop)
            .unwrap()
            .register("catch_all", noop)
            .unwrap();
        registry
    }

    const ROUTES: &str = r#"
        [[routes]]
        pattern = "/movies/findOne"
        handler = "specific"

        [[routes]]
        pattern = "/movies(/.*)?"
        handler = "catch_all"
    "#;

    #[test]
    fn test_resolve_registered_paths() {
        let table = RouteTable::from_toml_str(ROUTES, &registry()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.resolve("/movies").unwrap().handler_name(), "catch_all");
        assert_eq!(table.resolve("/movies/7").unwrap().handler_name(), "catch_all");
    }

    #[test]
    fn test_first_declared_route_wins() {
        let table = RouteTable::from_toml_str(ROUTES, &registry()).unwrap();
        let route = table.resolve("/movies/findOne").unwrap();

        assert_eq!(route.handler_name(), "specific");
        assert_eq!(route.pattern(), "/movies/findOne");
    }

    #[test]
    fn test_order_reversed_changes_winner() {
        let entries = vec![
            RouteEntry {
                pattern: "/movies(/.*)?".to_string(),
                handler: "catch_all".to_string(),
            },
            RouteEntry {
                pattern: "/movies/findOne".to_string(),
                handler: "specific".to_string(),
            },
        ];
        let table = RouteTable::from_entries(entries, &registry()).unwrap();

        assert_eq!(
            table.resolve("/movies/findOne").unwrap().handler_name(),
            "catch_all"
        );
    }

    #[test]
    fn test_match_is_anchored() {
        let table = RouteTable::from_toml_str(ROUTES, &registry()).unwrap();

        assert!(table.resolve("/api/movies").is_err());
        assert!(table.resolve("/moviesx").is_err());
        assert!(table.resolve("/movies/findOne/extra").is_ok());
    }

    #[test]
    fn test_anchoring_wraps_alternation() {
        let route = Route::new("/a|/b", "specific", noop).unwrap();

        assert!(route.matches("/a"));
        assert!(route.matches("/b"));
        assert!(!route.matches("/a/x"));
        assert!(!route.matches("x/b"));
    }

    #[test]
    fn test_unmatched_path_is_route_not_found() {
        let table = RouteTable::from_toml_str(ROUTES, &registry()).unwrap();
        let err = table.resolve("/series/1").unwrap_err();

        assert!(matches!(err, AppError::RouteNotFound { ref path } if path == "/series/1"));
    }

    #[test]
    fn test_unknown_handler_fails_to_load() {
        let source = r#"
            [[routes]]
            pattern = "/x"
            handler = "nobody.home"
        "#;

        let err = RouteTable::from_toml_str(source, &registry()).unwrap_err();
        assert!(matches!(err, RouteLoadError::UnknownHandler { ref handler, .. } if handler == "nobody.home"));
    }

    #[test]
    fn test_invalid_pattern_fails_to_load() {
        let source = r#"
            [[routes]]
            pattern = "/movies/("
            handler = "specific"
        "#;

        let err = RouteTable::from_toml_str(source, &registry()).unwrap_err();
        assert!(matches!(err, RouteLoadError::InvalidPattern { .. }));
    }

    #[test]
    fn test_empty_file_fails_to_load() {
        let err = RouteTable::from_toml_str("", &registry()).unwrap_err();
        assert!(matches!(err, RouteLoadError::Empty));
    }

    #[test]
    fn test_malformed_toml_fails_to_load() {
        let err = RouteTable::from_toml_str("[[routes]\npattern =", &registry()).unwrap_err();
        assert!(matches!(err, RouteLoadError::Parse(_)));
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let err = RouteTable::load("/definitely/not/here.toml", &registry()).unwrap_err();
        assert!(matches!(err, RouteLoadError::Io { .. }));
    }
}

//! Request dispatcher: route table lookup plus handler invocation.

use std::sync::Arc;

use async_trait::async_trait;

use super::{Route, RouteTable};
use crate::application::reply::Reply;
use crate::domain::request::Request;
use crate::error::AppError;
use crate::state::Services;

/// Finds and runs the handler for a request.
///
/// # Implementations
///
/// - [`RequestDispatcher`] - route-table backed dispatcher
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Resolves the request path and invokes the bound handler.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RouteNotFound`] if no route matches; handler errors
    /// are returned unmodified.
    async fn locate(&self, request: Request) -> Result<Reply, AppError>;
}

/// Dispatcher over a shared, read-only [`RouteTable`].
#[derive(Clone)]
pub struct RequestDispatcher {
    routes: Arc<RouteTable>,
    services: Services,
}

impl RequestDispatcher {
    pub fn new(routes: Arc<RouteTable>, services: Services) -> Self {
        Self { routes, services }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Resolves `path` without invoking anything.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::RouteNotFound`] if no route matches.
    pub fn resolve(&self, path: &str) -> Result<&Route, AppError> {
        self.routes.resolve(path)
    }
}

#[async_trait]
impl Dispatcher for RequestDispatcher {
    async fn locate(&self, request: Request) -> Result<Reply, AppError> {
        let path = request.path().unwrap_or_default();
        let route = self.resolve(path)?;

        tracing::debug!(
            path,
            pattern = route.pattern(),
            handler = route.handler_name(),
            "Route resolved"
        );

        let handler = route.handler();
        handler(self.services.clone(), request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dispatch::{HandlerFuture, HandlerRegistry};
    use serde_json::json;

    fn first(_: Services, _: Request) -> HandlerFuture {
        Box::pin(async { Ok(Reply::Json(json!("first"))) })
    }

    fn second(_: Services, request: Request) -> HandlerFuture {
        Box::pin(async move { Ok(Reply::Json(json!({ "path": request.path() }))) })
    }

    fn failing(_: Services, _: Request) -> HandlerFuture {
        Box::pin(async { Err(AppError::not_found("Movie", json!({ "id": 1 }))) })
    }

    fn dispatcher() -> RequestDispatcher {
        let mut registry = HandlerRegistry::new();
        registry
            .register("first", first)
            .unwrap()
            .register("second", second)
            .unwrap()
            .register("failing", failing)
            .unwrap();

        let source = r#"
            [[routes]]
            pattern = "/things/special"
            handler = "first"

            [[routes]]
            pattern = "/things(/.*)?"
            handler = "second"

            [[routes]]
            pattern = "/broken"
            handler = "failing"
        "#;

        let table = RouteTable::from_toml_str(source, &registry).unwrap();
        RequestDispatcher::new(Arc::new(table), Services::in_memory())
    }

    fn request(path: &str) -> Request {
        Request::from_event(json!({ "path": path, "httpMethod": "GET" })).unwrap()
    }

    #[tokio::test]
    async fn test_locate_invokes_first_match() {
        let reply = dispatcher().locate(request("/things/special")).await.unwrap();
        assert_eq!(reply, Reply::Json(json!("first")));
    }

    #[tokio::test]
    async fn test_locate_passes_request_to_handler() {
        let reply = dispatcher().locate(request("/things/42")).await.unwrap();
        assert_eq!(reply, Reply::Json(json!({ "path": "/things/42" })));
    }

    #[tokio::test]
    async fn test_locate_unknown_path() {
        let err = dispatcher().locate(request("/nothing")).await.unwrap_err();
        assert!(matches!(err, AppError::RouteNotFound { ref path } if path == "/nothing"));
    }

    #[tokio::test]
    async fn test_locate_missing_path() {
        let request = Request::from_event(json!({ "httpMethod": "GET" })).unwrap();
        let err = dispatcher().locate(request).await.unwrap_err();
        assert!(matches!(err, AppError::RouteNotFound { ref path } if path.is_empty()));
    }

    #[tokio::test]
    async fn test_handler_errors_propagate() {
        let err = dispatcher().locate(request("/broken")).await.unwrap_err();
        assert!(matches!(err, AppError::EntityNotFound { .. }));
    }

    #[test]
    fn test_resolve_does_not_invoke() {
        let dispatcher = dispatcher();
        assert_eq!(
            dispatcher.resolve("/things").unwrap().handler_name(),
            "second"
        );
        assert_eq!(dispatcher.routes().len(), 3);
    }
}

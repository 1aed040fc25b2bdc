//! Read-only view of an inbound request as it travels through the dispatch pipeline.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::error::AppError;

/// Execution metadata attached to a request by the transport boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub request_id: Option<String>,
    pub received_at: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(request_id: Option<String>) -> Self {
        Self {
            request_id,
            received_at: Utc::now(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(None)
    }
}

/// A client request in API-Gateway proxy shape.
///
/// `input` holds the raw envelope keys (`path`, `httpMethod`, `headers`,
/// `pathParameters`, `queryStringParameters`, `body`, `resource`). The core only
/// reads from it.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    input: Map<String, Value>,
    context: RequestContext,
}

impl Request {
    pub fn new(input: Map<String, Value>, context: RequestContext) -> Self {
        Self { input, context }
    }

    /// Builds a request from a raw JSON envelope.
    ///
    /// The request id is taken from `requestContext.requestId` when present.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArguments`] if the event is not a JSON object.
    pub fn from_event(event: Value) -> Result<Self, AppError> {
        let Value::Object(input) = event else {
            return Err(AppError::invalid_arguments(
                "event",
                serde_json::json!({ "hint": "event must be a JSON object" }),
            ));
        };

        let request_id = input
            .get("requestContext")
            .and_then(|ctx| ctx.get("requestId"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self::new(input, RequestContext::new(request_id)))
    }

    pub fn input(&self) -> &Map<String, Value> {
        &self.input
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.input.get(key).filter(|v| !v.is_null())
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns the object stored under `key`, or an empty map when absent or null.
    pub fn get_map(&self, key: &str) -> Map<String, Value> {
        match self.get(key) {
            Some(Value::Object(map)) => map.clone(),
            _ => Map::new(),
        }
    }

    pub fn path(&self) -> Option<&str> {
        self.get_str("path")
    }

    pub fn http_method(&self) -> Option<&str> {
        self.get_str("httpMethod")
    }

    /// Resource template of the request, falling back to the concrete path.
    pub fn resource(&self) -> &str {
        self.get_str("resource")
            .or_else(|| self.path())
            .unwrap_or_default()
    }

    pub fn headers(&self) -> Map<String, Value> {
        self.get_map("headers")
    }

    pub fn path_parameters(&self) -> Map<String, Value> {
        self.get_map("pathParameters")
    }

    pub fn query_parameters(&self) -> Map<String, Value> {
        self.get_map("queryStringParameters")
    }

    pub fn body(&self) -> Option<&Value> {
        self.get("body")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_event_reads_request_id() {
        let request = Request::from_event(json!({
            "path": "/movies",
            "requestContext": { "requestId": "abc-123" }
        }))
        .unwrap();

        assert_eq!(request.path(), Some("/movies"));
        assert_eq!(request.context().request_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn test_from_event_rejects_non_object() {
        let result = Request::from_event(json!(["not", "an", "object"]));
        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidArguments { .. }
        ));
    }

    #[test]
    fn test_missing_maps_are_empty() {
        let request = Request::from_event(json!({
            "path": "/movies",
            "queryStringParameters": null
        }))
        .unwrap();

        assert!(request.query_parameters().is_empty());
        assert!(request.path_parameters().is_empty());
        assert!(request.headers().is_empty());
    }

    #[test]
    fn test_resource_falls_back_to_path() {
        let request = Request::from_event(json!({ "path": "/movies/7" })).unwrap();
        assert_eq!(request.resource(), "/movies/7");

        let request = Request::from_event(json!({
            "path": "/movies/7",
            "resource": "/movies/{id}"
        }))
        .unwrap();
        assert_eq!(request.resource(), "/movies/{id}");
    }

    #[test]
    fn test_null_body_is_absent() {
        let request = Request::from_event(json!({ "path": "/", "body": null })).unwrap();
        assert!(request.body().is_none());
    }
}

//! Transport boundary between raw gateway envelopes and the dispatcher.
//!
//! Inbound: a JSON envelope in API-Gateway proxy shape, either received as-is or
//! built from an HTTP request by [`envelope_from_http`].
//!
//! Outbound: a [`GatewayResponse`] carrying the status code, JSON body and
//! standard headers.
//!
//! | Outcome | Status |
//! |---------|--------|
//! | empty reply (delete, `null`) | 204 with no body and no `Content-Type` |
//! | any other reply | 200 with JSON body |
//! | [`AppError`] | the error's status with `{"error": {...}}` |

use std::collections::BTreeMap;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::application::dispatch::Dispatcher;
use crate::application::reply::Reply;
use crate::domain::request::{Request, RequestContext};
use crate::error::{AppError, ErrorBody};
use crate::utils::path_params::extract_path_parameters;

pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const POWERED_BY_HEADER: &str = "X-Powered-By";
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Response in API-Gateway proxy shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub body: Option<String>,
    pub headers: BTreeMap<String, String>,
    pub is_base64_encoded: bool,
}

impl GatewayResponse {
    fn new(status: StatusCode, body: Option<String>) -> Self {
        let mut headers = BTreeMap::new();
        if body.is_some() {
            headers.insert(header::CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string());
        }
        headers.insert(POWERED_BY_HEADER.to_string(), powered_by());

        Self {
            status_code: status.as_u16(),
            body,
            headers,
            is_base64_encoded: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Parses the body back into JSON; `Value::Null` when there is none.
    pub fn json(&self) -> Value {
        self.body
            .as_deref()
            .and_then(|b| serde_json::from_str(b).ok())
            .unwrap_or(Value::Null)
    }
}

impl IntoResponse for GatewayResponse {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = self.body.map(Body::from).unwrap_or_else(Body::empty);

        let mut response = (status, body).into_response();
        let headers = response.headers_mut();
        for (name, value) in self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::try_from(name.as_str()),
                HeaderValue::try_from(value.as_str()),
            ) {
                headers.insert(name, value);
            }
        }

        response
    }
}

fn powered_by() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Turns a dispatch outcome into a gateway response, logging failures.
pub fn respond(result: Result<Reply, AppError>) -> GatewayResponse {
    match result {
        Ok(reply) => match reply.into_body().map(|value| serde_json::to_string(&value)) {
            None => GatewayResponse::new(StatusCode::NO_CONTENT, None),
            Some(Ok(body)) => GatewayResponse::new(StatusCode::OK, Some(body)),
            Some(Err(e)) => respond(Err(e.into())),
        },
        Err(err) => {
            if err.is_domain_error() {
                tracing::warn!(status = err.status().as_u16(), error = %err, "Request rejected");
            } else {
                tracing::error!(error = %err, "Request failed");
            }

            let body = ErrorBody {
                error: err.to_error_info(),
            };
            let body = serde_json::to_string(&body).ok();
            GatewayResponse::new(err.status(), body)
        }
    }
}

/// Dispatches an already-built request.
pub async fn handle_request(dispatcher: &dyn Dispatcher, request: Request) -> GatewayResponse {
    respond(dispatcher.locate(request).await)
}

/// Dispatches a raw JSON envelope.
///
/// A non-object envelope is answered with `400` without reaching the dispatcher.
pub async fn handle_event(dispatcher: &dyn Dispatcher, event: Value) -> GatewayResponse {
    match Request::from_event(event) {
        Ok(request) => handle_request(dispatcher, request).await,
        Err(err) => respond(Err(err)),
    }
}

/// Builds a gateway envelope from a plain HTTP request.
///
/// Path parameters follow the `/<collection>/<id>` convention. An empty body
/// becomes `null`; any other body is passed through as a string.
///
/// # Errors
///
/// Returns [`AppError::InvalidArguments`] for `body` if the body is not valid UTF-8.
pub fn envelope_from_http(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Value, AppError> {
    let path = uri.path();
    let shape = extract_path_parameters(path);

    let header_map: Map<String, Value> = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), Value::from(v)))
        })
        .collect();

    let query: Map<String, Value> = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), Value::from(v.into_owned())))
                .collect()
        })
        .unwrap_or_default();

    let body = if body.is_empty() {
        Value::Null
    } else {
        String::from_utf8(body.to_vec()).map(Value::from).map_err(|e| {
            let offset = e.utf8_error().valid_up_to();
            AppError::invalid_arguments(
                "body",
                json!({ "reason": "Body is not valid UTF-8", "offset": offset }),
            )
        })?
    };

    let mut envelope = Map::new();
    envelope.insert("path".to_string(), Value::from(path));
    envelope.insert("httpMethod".to_string(), Value::from(method.as_str()));
    envelope.insert("resource".to_string(), Value::from(shape.resource));
    envelope.insert("pathParameters".to_string(), Value::Object(shape.parameters));
    envelope.insert("queryStringParameters".to_string(), Value::Object(query));
    envelope.insert("headers".to_string(), Value::Object(header_map));
    envelope.insert("body".to_string(), body);

    Ok(Value::Object(envelope))
}

/// Builds a [`Request`] from a plain HTTP request, taking the id from `x-request-id`.
///
/// # Errors
///
/// Same as [`envelope_from_http`].
pub fn request_from_http(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<Request, AppError> {
    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let input = match envelope_from_http(method, uri, headers, body)? {
        Value::Object(input) => input,
        _ => Map::new(),
    };

    Ok(Request::new(input, RequestContext::new(request_id)))
}

//! Fallback handler forwarding every unmatched HTTP request to the dispatcher.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
};

use crate::api::gateway::{GatewayResponse, handle_request, request_from_http, respond};
use crate::state::AppState;

/// Converts the HTTP request into a gateway envelope and dispatches it.
///
/// # Response Codes
///
/// - **200 OK**: Entity or page returned
/// - **204 No Content**: Entity deleted
/// - **400 Bad Request**: Missing, non-UTF-8 or invalid body, id or paging parameter
/// - **404 Not Found**: No route or no entity
/// - **405 Method Not Allowed**: Method outside GET/POST/PUT/PATCH/DELETE
pub async fn gateway_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> GatewayResponse {
    match request_from_http(&method, &uri, &headers, &body) {
        Ok(request) => handle_request(state.dispatcher.as_ref(), request).await,
        Err(err) => respond(Err(err)),
    }
}

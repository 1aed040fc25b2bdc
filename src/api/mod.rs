//! HTTP surface of the service.
//!
//! # Modules
//!
//! - [`gateway`] - Envelope conversion and status mapping around the dispatcher
//! - [`handlers`] - axum handlers (dispatch fallback, health)
//! - [`dto`] - Response bodies of the service's own endpoints
//! - [`middleware`] - Request tracing

pub mod dto;
pub mod gateway;
pub mod handlers;
pub mod middleware;

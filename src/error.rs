//! Application error type shared by the dispatcher, controllers and services.
//!
//! Every variant carries the HTTP status the transport boundary replies with.
//! Errors travel unmodified from services up to the boundary, which is the only
//! place that turns them into a response.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;
use validator::ValidationErrors;

/// Message returned to callers in place of any internal failure detail.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// JSON envelope for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

/// Machine-readable code plus human-readable message and structured details.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("The route/resource {path} doesn't exist")]
    RouteNotFound { path: String },

    #[error("The entity {entity} doesn't contain all the required fields")]
    InvalidArguments { entity: String, details: Value },

    #[error("{message}")]
    InvalidArgument { field: String, message: String },

    #[error("{entity} already exists")]
    EntityAlreadyExists { entity: String, details: Value },

    #[error("{entity} doesn't exist")]
    EntityNotFound { entity: String, details: Value },

    #[error("HTTP method {method} is not supported")]
    UnsupportedMethod { method: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn route_not_found(path: impl Into<String>) -> Self {
        Self::RouteNotFound { path: path.into() }
    }

    pub fn invalid_arguments(entity: impl Into<String>, details: Value) -> Self {
        Self::InvalidArguments {
            entity: entity.into(),
            details,
        }
    }

    pub fn invalid_argument(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, details: Value) -> Self {
        Self::EntityAlreadyExists {
            entity: entity.into(),
            details,
        }
    }

    pub fn not_found(entity: impl Into<String>, details: Value) -> Self {
        Self::EntityNotFound {
            entity: entity.into(),
            details,
        }
    }

    pub fn unsupported_method(method: impl Into<String>) -> Self {
        Self::UnsupportedMethod {
            method: method.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code declared by this error kind.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::RouteNotFound { .. } | Self::EntityNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidArguments { .. }
            | Self::InvalidArgument { .. }
            | Self::EntityAlreadyExists { .. } => StatusCode::BAD_REQUEST,
            Self::UnsupportedMethod { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the error is an expected, caller-caused failure.
    pub fn is_domain_error(&self) -> bool {
        !matches!(self, Self::Internal { .. })
    }

    /// Converts the error into its public representation.
    ///
    /// Internal errors never expose their message or details.
    pub fn to_error_info(&self) -> ErrorInfo {
        let message = self.to_string();
        match self {
            Self::RouteNotFound { path } => ErrorInfo {
                code: "route_not_found",
                message,
                details: json!({ "path": path }),
            },
            Self::InvalidArguments { details, .. } => ErrorInfo {
                code: "invalid_arguments",
                message,
                details: details.clone(),
            },
            Self::InvalidArgument { field, .. } => ErrorInfo {
                code: "invalid_argument",
                message,
                details: json!({ "field": field }),
            },
            Self::EntityAlreadyExists { details, .. } => ErrorInfo {
                code: "entity_already_exists",
                message,
                details: details.clone(),
            },
            Self::EntityNotFound { details, .. } => ErrorInfo {
                code: "entity_not_found",
                message,
                details: details.clone(),
            },
            Self::UnsupportedMethod { method } => ErrorInfo {
                code: "unsupported_method",
                message,
                details: json!({ "method": method }),
            },
            Self::Internal { .. } => ErrorInfo {
                code: "internal_error",
                message: INTERNAL_ERROR_MESSAGE.to_string(),
                details: json!({}),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::internal(format!("Serialization error: {e}"))
    }
}

/// Wraps validation failures for an entity body.
pub fn map_validation_errors(entity: &str, errors: ValidationErrors) -> AppError {
    let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
    AppError::invalid_arguments(entity, details)
}

//! Route resolution and handler dispatch.
//!
//! - [`registry`] - Static table of handler functions, filled by each entity module
//! - [`route_table`] - Ordered regex routes loaded from the route file
//! - [`dispatcher`] - Resolves a request path and invokes the bound handler
//!
//! The route table is built once at startup and shared read-only behind an `Arc`.

pub mod dispatcher;
pub mod registry;
pub mod route_table;

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use thiserror::Error;

use crate::application::reply::Reply;
use crate::domain::request::Request;
use crate::error::AppError;
use crate::state::Services;

pub use dispatcher::{Dispatcher, RequestDispatcher};
pub use registry::HandlerRegistry;
pub use route_table::{Route, RouteEntry, RouteTable};

#[cfg(test)]
pub use dispatcher::MockDispatcher;

/// Future returned by a handler.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<Reply, AppError>> + Send>>;

/// A registered request handler.
pub type HandlerFn = fn(Services, Request) -> HandlerFuture;

/// Failures while building the route table. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum RouteLoadError {
    #[error("failed to read route file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse route file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid route pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("route '{pattern}' refers to unknown handler '{handler}'")]
    UnknownHandler { pattern: String, handler: String },

    #[error("handler '{0}' is registered twice")]
    DuplicateHandler(String),

    #[error("route table is empty")]
    Empty,
}

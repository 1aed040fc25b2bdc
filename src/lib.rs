//! # Blockbuster Gateway
//!
//! A route-table dispatcher in front of generic CRUD entity services, built with Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, request model, pages and the CRUD service contract
//! - **Application Layer** ([`application`]) - Route table, dispatcher, generic entity controller and pagination
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory stores
//! - **API Layer** ([`api`]) - Gateway envelope conversion, HTTP handlers and middleware
//!
//! A request flows as: envelope → [`application::dispatch::Dispatcher`] → registered
//! handler → [`application::controllers::route`] → [`domain::services::CrudService`],
//! and the result is mapped back to a status code and JSON body.
//!
//! ## Quick Start
//!
//! ```bash
//! export ROUTES_FILE="routes.toml"
//! export SEED_FILE="movies.json"   # Optional
//!
//! cargo run
//! curl "http://localhost:3000/movies?page=1&size=10"
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::dispatch::{
        Dispatcher, HandlerRegistry, RequestDispatcher, RouteTable,
    };
    pub use crate::application::reply::Reply;
    pub use crate::domain::entities::{Movie, Person};
    pub use crate::domain::page::{Page, Pagination};
    pub use crate::domain::request::Request;
    pub use crate::domain::services::CrudService;
    pub use crate::domain::user::User;
    pub use crate::error::AppError;
    pub use crate::infrastructure::memory::MovieService;
    pub use crate::state::{AppState, Services};
}
